//! Per-navigation access decision.

use crate::routes::{DASHBOARD_PATH, LOGIN_PATH};

/// Outcome of guarding one navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    RedirectToLogin,
    RedirectToDashboard,
}

impl Verdict {
    /// Path the navigation is sent to instead, if any
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Verdict::Proceed => None,
            Verdict::RedirectToLogin => Some(LOGIN_PATH),
            Verdict::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

/// Decides whether a navigation to `target` may complete.
///
/// Protected routes bounce anonymous users to the login view; the login view
/// bounces users who are already signed in to the dashboard.
pub fn check(target: &str, requires_auth: bool, authenticated: bool) -> Verdict {
    if requires_auth {
        if authenticated {
            Verdict::Proceed
        } else {
            Verdict::RedirectToLogin
        }
    } else if target == LOGIN_PATH && authenticated {
        Verdict::RedirectToDashboard
    } else {
        Verdict::Proceed
    }
}
