//! # Geographic Utilities
//!
//! Distance computation over GPS tracks.
//!
//! Runkeeper's own frontend derives distances with a flat-projection
//! approximation rather than a true geodesic, and this module reproduces
//! that computation exactly, constants included, so that values stay
//! numerically compatible with what the site reports.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`segment_distance`] | Distance between two consecutive GPS samples |
//! | [`track_distance`] | Total length of a track in kilometres |
//!
//! ## Algorithm Notes
//!
//! For each consecutive pair of points, the latitude delta and the
//! cosine-weighted longitude delta are converted to nautical miles and
//! combined as the two legs of a right triangle. The result is within a
//! fraction of a percent of the great-circle distance for the short
//! segments typical of GPS tracks, and diverges for segments spanning
//! hundreds of kilometres — which do not occur between consecutive
//! workout samples.

use crate::GeoPoint;

/// Nautical miles per degree of latitude.
pub const NAUTICAL_MILES_PER_DEGREE_LAT: f64 = 60.00721;

/// Nautical miles per degree of longitude at the equatorial reference.
pub const NAUTICAL_MILES_PER_DEGREE_LON: f64 = 60.10793;

/// Kilometres per nautical mile.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

// =============================================================================
// Distance Functions
// =============================================================================

/// Distance in kilometres between two GPS samples.
///
/// Symmetric under endpoint swap and zero for identical points. Timestamps
/// play no part in the computation.
///
/// # Example
///
/// ```rust
/// use runkeeper_client::{geo, GeoPoint};
///
/// let start = GeoPoint::new(51.5074, -0.1278, 0);
/// let end = GeoPoint::new(51.5080, -0.1290, 30_000);
///
/// let km = geo::segment_distance(&start, &end);
/// assert!(km > 0.0 && km < 0.2);
/// ```
#[inline]
pub fn segment_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let y = (p2.latitude - p1.latitude) * NAUTICAL_MILES_PER_DEGREE_LAT;
    let x = (p1.latitude.to_radians().cos() + p2.latitude.to_radians().cos())
        * (p2.longitude - p1.longitude)
        * (NAUTICAL_MILES_PER_DEGREE_LON / 2.0);

    (y * y + x * x).sqrt() * KM_PER_NAUTICAL_MILE
}

/// Total length of a track in kilometres.
///
/// Sums [`segment_distance`] over consecutive points, in order. Tracks
/// with fewer than two points have length 0.0.
///
/// # Example
///
/// ```rust
/// use runkeeper_client::{geo, GeoPoint};
///
/// let track = vec![
///     GeoPoint::new(51.5074, -0.1278, 0),
///     GeoPoint::new(51.5080, -0.1290, 30_000),
///     GeoPoint::new(51.5090, -0.1300, 60_000),
/// ];
///
/// let km = geo::track_distance(&track);
/// assert!(km > 0.0);
/// ```
pub fn track_distance(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| segment_distance(&pair[0], &pair[1]))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
