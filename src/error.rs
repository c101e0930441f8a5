//! Error types shared across the crate.

use std::result;

/// Everything that can go wrong while reconstructing an activity.
///
/// Nothing here is retried or recovered from: a failure aborts the lookup
/// in progress and surfaces to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure or non-success HTTP status while fetching a page.
    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Malformed JSON in the activity points feed.
    #[error("malformed activity feed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The points feed held no samples, so start and end times cannot be
    /// derived.
    #[error("activity {0} has no GPS points")]
    EmptyActivity(String),

    /// Pace is undefined for an activity that covers no distance.
    #[error("activity {0} covers zero distance")]
    ZeroDistance(String),

    /// Average speed is undefined for an activity with no elapsed time.
    #[error("activity {0} has zero duration")]
    ZeroDuration(String),
}

/// Result type alias used throughout the crate.
pub type Result<T> = result::Result<T, Error>;
