//! A single recorded workout.
//!
//! An [`Activity`] is reconstructed from two resources keyed by its id: a
//! JSON points feed carrying the raw GPS track, and a rendered header
//! fragment naming the workout type. Both are fetched eagerly at
//! construction; the derived metrics (distance, pace, average speed) are
//! computed on first use and cached for the lifetime of the value.

use std::fmt;

use log::{debug, warn};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo;
use crate::http::Transport;
use crate::scrape;
use crate::{GeoPoint, BASE_URL};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

// =============================================================================
// Activity Type
// =============================================================================

/// Coarse classification of a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Running,
    Cycling,
    MountainBiking,
    Walking,
    Hiking,
    DownhillSkiing,
    CrossCountrySkiing,
    Snowboarding,
    Skating,
    Swimming,
    Wheelchair,
    Rowing,
    Elliptical,
    Other,
    /// No recognized keyword in the activity header.
    Unknown,
}

/// Keywords scanned over the activity header, highest priority first.
///
/// The first keyword found in the header text decides the type; the order
/// of this table is part of the classification contract.
pub const KEYWORD_PRIORITY: [(&str, ActivityType); 14] = [
    ("Running", ActivityType::Running),
    ("Cycling", ActivityType::Cycling),
    ("Mountain Biking", ActivityType::MountainBiking),
    ("Walking", ActivityType::Walking),
    ("Hiking", ActivityType::Hiking),
    ("Downhill Skiing", ActivityType::DownhillSkiing),
    ("Cross-Country Skiing", ActivityType::CrossCountrySkiing),
    ("Snowboarding", ActivityType::Snowboarding),
    ("Skating", ActivityType::Skating),
    ("Swimming", ActivityType::Swimming),
    ("Wheelchair", ActivityType::Wheelchair),
    ("Rowing", ActivityType::Rowing),
    ("Elliptical", ActivityType::Elliptical),
    ("Other", ActivityType::Other),
];

impl ActivityType {
    /// Human-readable label, as the site spells it.
    pub fn label(self) -> &'static str {
        match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::MountainBiking => "Mountain Biking",
            ActivityType::Walking => "Walking",
            ActivityType::Hiking => "Hiking",
            ActivityType::DownhillSkiing => "Downhill Skiing",
            ActivityType::CrossCountrySkiing => "Cross-Country Skiing",
            ActivityType::Snowboarding => "Snowboarding",
            ActivityType::Skating => "Skating",
            ActivityType::Swimming => "Swimming",
            ActivityType::Wheelchair => "Wheelchair",
            ActivityType::Rowing => "Rowing",
            ActivityType::Elliptical => "Elliptical",
            ActivityType::Other => "Other",
            ActivityType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decide the activity type from the rendered header fragment.
fn classify_header(header_html: &str) -> ActivityType {
    scrape::first_keyword(header_html, &KEYWORD_PRIORITY).unwrap_or(ActivityType::Unknown)
}

// =============================================================================
// Activity
// =============================================================================

/// Shape of the `/ajax/activityInfo` points feed.
#[derive(Deserialize)]
struct PointsFeed {
    points: Vec<GeoPoint>,
}

/// JSON record produced by [`Activity::to_json`]. Field names are fixed;
/// existing consumers key on them.
#[derive(Serialize)]
struct ActivityRecord<'a> {
    activity_type: &'a str,
    start_time: i64,
    end_time: i64,
    total_distance: f64,
    pace: String,
    average_speed: f64,
    points: &'a [GeoPoint],
}

/// One recorded workout with its GPS track and classification.
///
/// Structurally immutable once constructed; the only interior state is
/// the one-time cache behind each derived metric.
#[derive(Debug, Clone)]
pub struct Activity {
    activity_id: String,
    points: Vec<GeoPoint>,
    start_time: i64,
    end_time: i64,
    duration: i64,
    activity_type: ActivityType,
    distance_km: OnceCell<f64>,
    pace_ms_per_km: OnceCell<f64>,
    avg_speed_kmh: OnceCell<f64>,
}

impl Activity {
    /// Fetch and parse the activity identified by `activity_id`.
    ///
    /// Issues two requests: the JSON points feed and the rendered header
    /// fragment. Fails with [`Error::EmptyActivity`] when the feed holds
    /// no samples, since start and end times come from the first and last
    /// point. No partially constructed activity is ever returned.
    pub fn fetch<T: Transport>(transport: &T, activity_id: &str) -> Result<Self> {
        let points_url = format!("{BASE_URL}/ajax/activityInfo?tripId={activity_id}");
        let feed: PointsFeed = serde_json::from_str(&transport.fetch(&points_url)?)?;
        let points = feed.points;

        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::EmptyActivity(activity_id.to_string())),
        };
        let start_time = first.time_millis;
        let end_time = last.time_millis;

        let invalid = points.iter().filter(|p| !p.is_valid()).count();
        if invalid > 0 {
            warn!(
                "activity {}: {} of {} points carry out-of-range coordinates",
                activity_id,
                invalid,
                points.len()
            );
        }

        let header_url = format!("{BASE_URL}/ui/activityHeader/{activity_id}");
        let activity_type = classify_header(&transport.fetch(&header_url)?);

        debug!(
            "activity {}: {} points, type {}",
            activity_id,
            points.len(),
            activity_type
        );

        Ok(Self {
            activity_id: activity_id.to_string(),
            start_time,
            end_time,
            duration: end_time - start_time,
            activity_type,
            points,
            distance_km: OnceCell::new(),
            pace_ms_per_km: OnceCell::new(),
            avg_speed_kmh: OnceCell::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.activity_id
    }

    /// The raw GPS track, in chronological order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Timestamp of the first sample, epoch milliseconds.
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Timestamp of the last sample, epoch milliseconds.
    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    /// Elapsed time in milliseconds.
    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    /// Total track distance in kilometres.
    ///
    /// Computed on first call and cached — including when the computed
    /// value is a legitimate 0.0.
    pub fn distance_km(&self) -> f64 {
        *self
            .distance_km
            .get_or_init(|| geo::track_distance(&self.points))
    }

    /// Average pace in milliseconds per kilometre.
    ///
    /// Fails with [`Error::ZeroDistance`] for a track that covers no
    /// ground.
    pub fn pace(&self) -> Result<f64> {
        let distance = self.distance_km();
        if distance == 0.0 {
            return Err(Error::ZeroDistance(self.activity_id.clone()));
        }

        Ok(*self
            .pace_ms_per_km
            .get_or_init(|| self.duration as f64 / distance))
    }

    /// Average speed in kilometres per hour.
    ///
    /// Fails with [`Error::ZeroDuration`] when the first and last samples
    /// share a timestamp.
    pub fn avg_speed(&self) -> Result<f64> {
        if self.duration == 0 {
            return Err(Error::ZeroDuration(self.activity_id.clone()));
        }

        Ok(*self
            .avg_speed_kmh
            .get_or_init(|| (self.distance_km() / self.duration as f64) * MILLIS_PER_HOUR))
    }

    /// Serialize the activity to its consumer-facing JSON record:
    /// type, start/end times, total distance, pace as a clock-style
    /// string, average speed, and the raw points.
    pub fn to_json(&self) -> Result<String> {
        let record = ActivityRecord {
            activity_type: self.activity_type.label(),
            start_time: self.start_time,
            end_time: self.end_time,
            total_distance: self.distance_km(),
            pace: format_pace(self.pace()?),
            average_speed: self.avg_speed()?,
            points: &self.points,
        };

        Ok(serde_json::to_string(&record)?)
    }
}

/// Render a millisecond pace as a clock-style duration string,
/// e.g. `0:05:13`, with a six-digit fractional-seconds suffix when the
/// pace is not a whole number of seconds (`0:05:13.250000`).
fn format_pace(pace_ms: f64) -> String {
    let total_micros = (pace_ms * 1_000.0).round() as i64;
    let micros = total_micros % 1_000_000;
    let total_secs = total_micros / 1_000_000;

    let hours = total_secs / 3600;
    let mins = (total_secs / 60) % 60;
    let secs = total_secs % 60;

    if micros == 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{hours}:{mins:02}:{secs:02}.{micros:06}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeTransport;

    fn points_url(id: &str) -> String {
        format!("{BASE_URL}/ajax/activityInfo?tripId={id}")
    }

    fn header_url(id: &str) -> String {
        format!("{BASE_URL}/ui/activityHeader/{id}")
    }

    /// Three samples along the equator, one minute apart.
    const EQUATOR_FEED: &str = r#"{"points": [
        {"latitude": 0.0, "longitude": 0.0, "timeMillis": 0},
        {"latitude": 0.0, "longitude": 0.01, "timeMillis": 60000},
        {"latitude": 0.0, "longitude": 0.02, "timeMillis": 120000}
    ]}"#;

    fn canned(id: &str, feed: &str, header: &str) -> FakeTransport {
        FakeTransport::new()
            .page(points_url(id), feed)
            .page(header_url(id), header)
    }

    fn equator_activity() -> Activity {
        let transport = canned("100", EQUATOR_FEED, "<h1>Cycling</h1>");
        Activity::fetch(&transport, "100").unwrap()
    }

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_fetch_parses_track_and_times() {
        let activity = equator_activity();
        assert_eq!(activity.id(), "100");
        assert_eq!(activity.points().len(), 3);
        assert_eq!(activity.start_time(), 0);
        assert_eq!(activity.end_time(), 120_000);
        assert_eq!(activity.duration(), 120_000);
        assert_eq!(activity.activity_type(), ActivityType::Cycling);
    }

    #[test]
    fn test_fetch_requests_feed_and_header_once_each() {
        let transport = canned("100", EQUATOR_FEED, "<h1>Cycling</h1>");
        Activity::fetch(&transport, "100").unwrap();
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_empty_feed_is_an_error() {
        let transport = canned("7", r#"{"points": []}"#, "<h1>Running</h1>");
        let result = Activity::fetch(&transport, "7");
        assert!(matches!(result, Err(Error::EmptyActivity(id)) if id == "7"));
    }

    #[test]
    fn test_malformed_feed_is_a_parse_error() {
        let transport = canned("7", "<html>oops</html>", "<h1>Running</h1>");
        let result = Activity::fetch(&transport, "7");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_classification_falls_back_to_unknown() {
        let transport = canned("100", EQUATOR_FEED, "<h1>Lounging</h1>");
        let activity = Activity::fetch(&transport, "100").unwrap();
        assert_eq!(activity.activity_type(), ActivityType::Unknown);
    }

    #[test]
    fn test_classification_uses_priority_order() {
        // "Running" outranks "Cycling" when a header mentions both.
        let transport = canned("100", EQUATOR_FEED, "<p>Cycling? No: Running</p>");
        let activity = Activity::fetch(&transport, "100").unwrap();
        assert_eq!(activity.activity_type(), ActivityType::Running);
    }

    #[test]
    fn test_distance_is_memoized_and_stable() {
        let activity = equator_activity();
        let first = activity.distance_km();
        let second = activity.distance_km();
        assert!(first > 0.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_distance_track() {
        let feed = r#"{"points": [
            {"latitude": 45.0, "longitude": 7.0, "timeMillis": 0},
            {"latitude": 45.0, "longitude": 7.0, "timeMillis": 60000}
        ]}"#;
        let transport = canned("9", feed, "<h1>Running</h1>");
        let activity = Activity::fetch(&transport, "9").unwrap();

        // A legitimately zero distance is cached like any other value,
        // and pace over it is an error rather than a division by zero.
        assert_eq!(activity.distance_km(), 0.0);
        assert_eq!(activity.distance_km(), 0.0);
        assert!(matches!(activity.pace(), Err(Error::ZeroDistance(_))));
        assert_eq!(activity.avg_speed().unwrap(), 0.0);
    }

    #[test]
    fn test_zero_duration_track() {
        let feed = r#"{"points": [
            {"latitude": 0.0, "longitude": 0.0, "timeMillis": 5},
            {"latitude": 0.0, "longitude": 0.01, "timeMillis": 5}
        ]}"#;
        let transport = canned("9", feed, "<h1>Running</h1>");
        let activity = Activity::fetch(&transport, "9").unwrap();

        assert_eq!(activity.duration(), 0);
        assert!(matches!(activity.avg_speed(), Err(Error::ZeroDuration(_))));
        assert_eq!(activity.pace().unwrap(), 0.0);
    }

    #[test]
    fn test_pace_times_distance_recovers_duration() {
        let activity = equator_activity();
        let product = activity.pace().unwrap() * activity.distance_km();
        assert!(approx_eq(product, activity.duration() as f64, 1e-6));
    }

    #[test]
    fn test_avg_speed_identity() {
        let activity = equator_activity();
        let expected =
            (activity.distance_km() / activity.duration() as f64) * MILLIS_PER_HOUR;
        assert!(approx_eq(activity.avg_speed().unwrap(), expected, 1e-9));
    }

    #[test]
    fn test_end_to_end_three_point_track() {
        let activity = equator_activity();
        let distance = activity.distance_km();

        assert!(distance > 0.0);
        assert_eq!(activity.duration(), 120_000);
        assert!(approx_eq(
            activity.avg_speed().unwrap(),
            distance / 120_000.0 * MILLIS_PER_HOUR,
            1e-9
        ));
    }

    #[test]
    fn test_to_json_record_shape() {
        let activity = equator_activity();
        let json: serde_json::Value =
            serde_json::from_str(&activity.to_json().unwrap()).unwrap();

        assert_eq!(json["activity_type"], "Cycling");
        assert_eq!(json["start_time"], 0);
        assert_eq!(json["end_time"], 120_000);
        assert_eq!(json["total_distance"], activity.distance_km());
        assert_eq!(json["average_speed"], activity.avg_speed().unwrap());
        assert!(json["pace"].is_string());
        assert_eq!(json["points"].as_array().unwrap().len(), 3);
        // Wire spelling of the timestamp field survives the round trip.
        assert_eq!(json["points"][0]["timeMillis"], 0);
    }

    #[test]
    fn test_format_pace_whole_seconds() {
        assert_eq!(format_pace(0.0), "0:00:00");
        assert_eq!(format_pace(330_000.0), "0:05:30");
        assert_eq!(format_pace(3_600_000.0), "1:00:00");
    }

    #[test]
    fn test_format_pace_fractional_seconds() {
        assert_eq!(format_pace(53_899.3), "0:00:53.899300");
    }
}
