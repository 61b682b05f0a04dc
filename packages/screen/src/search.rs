//! Bookkeeping for in-flight geocoding requests.
//!
//! Every submitted search gets a monotonically increasing [`SearchToken`].
//! Requests are never cancelled; the tracker only decides whether a
//! response that has just arrived may still touch the screen state.

use crate::config::StaleResponsePolicy;

/// Identifies one submitted search, ordered by submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchToken(u64);

impl std::fmt::Display for SearchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tokens and filters responses according to a
/// [`StaleResponsePolicy`].
#[derive(Debug)]
pub struct SearchTracker {
    policy: StaleResponsePolicy,
    next: u64,
    newest_settled: Option<SearchToken>,
    in_flight: usize,
}

impl SearchTracker {
    /// Creates a tracker with no requests issued.
    #[must_use]
    pub const fn new(policy: StaleResponsePolicy) -> Self {
        Self {
            policy,
            next: 0,
            newest_settled: None,
            in_flight: 0,
        }
    }

    /// Registers a new request and returns its token.
    pub const fn issue(&mut self) -> SearchToken {
        let token = SearchToken(self.next);
        self.next += 1;
        self.in_flight += 1;
        token
    }

    /// Marks `token` as settled and reports whether its response should be
    /// applied.
    ///
    /// Under [`StaleResponsePolicy::DiscardStale`] a response is rejected
    /// when a newer request has already settled, whatever that request's
    /// outcome was.
    pub fn settle(&mut self, token: SearchToken) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        let is_stale = self.newest_settled.is_some_and(|newest| token < newest);
        self.newest_settled = self.newest_settled.max(Some(token));

        match self.policy {
            StaleResponsePolicy::LastArrivalWins => true,
            StaleResponsePolicy::DiscardStale => !is_stale,
        }
    }

    /// Number of requests issued but not yet settled.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}
