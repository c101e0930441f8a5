//! # Runkeeper Client
//!
//! Scraping client for [Runkeeper](https://runkeeper.com). Runkeeper has
//! no official API, so activities are reconstructed from the public
//! profile page and the ad-hoc JSON fragments behind it, and distance,
//! pace, and speed statistics are derived from the raw GPS track.
//!
//! ## Features
//!
//! - **`parallel`** - Fetch a user's activities concurrently with rayon
//!
//! ## Quick Start
//!
//! ```no_run
//! use runkeeper_client::User;
//!
//! # fn main() -> runkeeper_client::Result<()> {
//! let user = User::new("bnmrrs");
//!
//! let mut total_distance = 0.0;
//! for activity in user.activities()? {
//!     total_distance += activity.distance_km();
//! }
//!
//! println!("{total_distance:.1}km");
//! # Ok(())
//! # }
//! ```
//!
//! Everything is synchronous and blocking; each activity lookup issues
//! its own independent requests. The scraping itself — which page
//! elements carry activity ids, which keywords name an activity type —
//! is confined to the [`scrape`] module.

use serde::{Deserialize, Serialize};

pub mod activity;
pub mod error;
pub mod geo;
pub mod http;
pub mod scrape;
pub mod user;

pub use activity::{Activity, ActivityType};
pub use error::{Error, Result};
pub use http::{HttpTransport, Transport};
pub use user::User;

pub(crate) const BASE_URL: &str = "https://runkeeper.com";

// ============================================================================
// Core Types
// ============================================================================

/// One GPS sample of an activity track.
///
/// Field names round-trip with Runkeeper's wire format, which spells the
/// timestamp `timeMillis`.
///
/// # Example
/// ```
/// use runkeeper_client::GeoPoint;
/// let point = GeoPoint::new(51.5074, -0.1278, 1_240_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Sample timestamp in epoch milliseconds.
    #[serde(rename = "timeMillis")]
    pub time_millis: i64,
}

impl GeoPoint {
    /// Create a new GPS sample.
    pub fn new(latitude: f64, longitude: f64, time_millis: i64) -> Self {
        Self {
            latitude,
            longitude,
            time_millis,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}
