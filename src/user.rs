//! Lookup facade over a user's public profile.

use log::info;

use crate::activity::Activity;
use crate::error::Result;
use crate::http::{HttpTransport, Transport};
use crate::scrape;
use crate::BASE_URL;

/// One Runkeeper user, addressed by username.
///
/// Holds no state beyond the username and the transport lookups go
/// through; every returned [`Activity`] is independently owned by the
/// caller, with no back-reference to the user it came from.
pub struct User<T = HttpTransport> {
    username: String,
    transport: T,
}

impl User<HttpTransport> {
    /// Look up `username` over a fresh blocking HTTP transport.
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_transport(username, HttpTransport::new())
    }
}

impl<T: Transport> User<T> {
    /// Look up `username` through a caller-supplied transport.
    pub fn with_transport(username: impl Into<String>, transport: T) -> Self {
        Self {
            username: username.into(),
            transport,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// All activity ids embedded in the profile page, in document order.
    ///
    /// Duplicates are preserved. A profile with no activities yields an
    /// empty vec rather than an error.
    pub fn activity_ids(&self) -> Result<Vec<String>> {
        let profile_url = format!("{BASE_URL}/user/{}", self.username);
        let profile = self.transport.fetch(&profile_url)?;

        let ids = scrape::extract_trip_ids(&profile);
        info!("user {}: {} activity ids on profile", self.username, ids.len());

        Ok(ids)
    }

    /// Fetch every activity on the profile, eagerly and in profile order.
    ///
    /// Each activity performs its own two fetches; the first failure
    /// aborts the whole lookup.
    pub fn activities(&self) -> Result<Vec<Activity>> {
        self.activity_ids()?
            .iter()
            .map(|id| self.activity(id))
            .collect()
    }

    /// Fetch every activity on the profile, issuing the per-activity
    /// requests in parallel.
    ///
    /// Activities are independently constructible, so the fetches may
    /// overlap freely; results are reassembled in profile order before
    /// being returned.
    #[cfg(feature = "parallel")]
    pub fn activities_parallel(&self) -> Result<Vec<Activity>>
    where
        T: Sync,
    {
        use rayon::prelude::*;

        let ids = self.activity_ids()?;
        ids.par_iter().map(|id| self.activity(id)).collect()
    }

    /// Fetch a single activity by id. Pure delegation: fails exactly as
    /// [`Activity::fetch`] fails.
    pub fn activity(&self, activity_id: &str) -> Result<Activity> {
        Activity::fetch(&self.transport, activity_id)
    }
}
