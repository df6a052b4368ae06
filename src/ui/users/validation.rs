//! Form field checks shared by live editing and submit.

use std::sync::LazyLock;

use regex::Regex;

// local@domain.tld, with the same character classes the platform
// email matcher accepts.
static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern is valid")
});

pub fn is_name_invalid(name: &str) -> bool {
    name.trim().is_empty()
}

pub fn is_email_invalid(email: &str) -> bool {
    email.trim().is_empty() || !EMAIL_ADDRESS.is_match(email)
}

/// Outcome of checking both form fields at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCheck {
    pub name_error: bool,
    pub email_error: bool,
}

impl FormCheck {
    pub fn run(name: &str, email: &str) -> Self {
        Self {
            name_error: is_name_invalid(name),
            email_error: is_email_invalid(email),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name_error && !self.email_error
    }

    /// Notification text for a failed check.
    pub fn message(&self) -> Option<&'static str> {
        match (self.name_error, self.email_error) {
            (true, true) => Some("Name and email are invalid."),
            (true, false) => Some("Name cannot be empty."),
            (false, true) => Some("Invalid email address."),
            (false, false) => None,
        }
    }
}
