//! Explicit session context for the console.
//!
//! Passed to the console at construction instead of being read from
//! ambient storage; anonymous use falls back to a guest session.

/// The signed-in user, or the guest fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub display_name: String,
    pub role: String,
}

impl UserSession {
    pub fn new(display_name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            role: role.into(),
        }
    }

    /// The defined fallback when no session is present.
    pub fn guest() -> Self {
        Self::new("Guest", "guest")
    }

    pub fn is_guest(&self) -> bool {
        self.role == "guest"
    }
}

impl Default for UserSession {
    fn default() -> Self {
        Self::guest()
    }
}
