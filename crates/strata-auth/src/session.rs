//! Client-side session state.

use std::time::Duration;

use tokio::time::Instant;

/// How long a login is considered fresh without any further confirmation.
pub const SESSION_WINDOW: Duration = Duration::from_secs(30 * 60);

/// State recorded by a successful login.
///
/// Freshness is a local heuristic: the session counts as live while less
/// than [`SESSION_WINDOW`] has elapsed since login, with no server
/// round-trip. Callers must tolerate the server having expired the session
/// earlier than that.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    username_field: String,
    logged_in_at: Instant,
}

impl Session {
    /// Record a login that just happened.
    pub fn begin(username: impl Into<String>, username_field: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            username_field: username_field.into(),
            logged_in_at: Instant::now(),
        }
    }

    /// The logged-in username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The schema field the username was submitted under.
    pub fn username_field(&self) -> &str {
        &self.username_field
    }

    /// Time elapsed since login.
    pub fn age(&self) -> Duration {
        self.logged_in_at.elapsed()
    }

    /// Whether the session is still within the given freshness window.
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.age() < window
    }
}
