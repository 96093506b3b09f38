//! Static route table and the navigator that walks it.

use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::auth::CredentialGate;
use crate::guard;
use crate::session::SessionStore;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Upper bound on redirects followed by a single navigation
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Login => f.write_str("Login"),
            View::Dashboard => f.write_str("Dashboard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Redirect(&'static str),
    View(View),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: Target,
    pub requires_auth: bool,
}

pub static ROUTES: [Route; 3] = [
    Route {
        path: ROOT_PATH,
        name: None,
        target: Target::Redirect(DASHBOARD_PATH),
        requires_auth: false,
    },
    Route {
        path: LOGIN_PATH,
        name: Some("Login"),
        target: Target::View(View::Login),
        requires_auth: false,
    },
    Route {
        path: DASHBOARD_PATH,
        name: Some("Dashboard"),
        target: Target::View(View::Dashboard),
        requires_auth: true,
    },
];

pub fn find(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.path == path)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no route matches {0}")]
    NotFound(String),
    #[error("too many redirects while navigating to {0}")]
    RedirectLoop(String),
}

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: &'static str,
    pub view: View,
    /// Every path visited before `path`, starting with the requested one
    pub redirects: Vec<String>,
}

impl Resolved {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Resolves requested paths against [`ROUTES`], consulting the gate on every hop
pub struct Navigator<'a, S> {
    gate: &'a CredentialGate<S>,
    base_path: String,
}

impl<'a, S: SessionStore> Navigator<'a, S> {
    /// `base_path` must already be normalized (leading and trailing `/`)
    pub fn new(gate: &'a CredentialGate<S>, base_path: impl Into<String>) -> Self {
        Self {
            gate,
            base_path: base_path.into(),
        }
    }

    pub fn navigate(&self, requested: &str) -> Result<Resolved, NavigationError> {
        let mut current = self.app_path(requested);
        let mut redirects = Vec::new();

        for _ in 0..=MAX_REDIRECTS {
            let route =
                find(&current).ok_or_else(|| NavigationError::NotFound(current.clone()))?;

            let view = match route.target {
                Target::Redirect(to) => {
                    debug!("{} redirects to {}", route.path, to);
                    redirects.push(std::mem::replace(&mut current, to.to_string()));
                    continue;
                }
                Target::View(view) => view,
            };

            let verdict =
                guard::check(route.path, route.requires_auth, self.gate.is_authenticated());
            let Some(to) = verdict.redirect_path() else {
                return Ok(Resolved {
                    path: route.path,
                    view,
                    redirects,
                });
            };
            debug!("Guard sends {} to {} ({:?})", route.path, to, verdict);
            redirects.push(std::mem::replace(&mut current, to.to_string()));
        }

        Err(NavigationError::RedirectLoop(requested.to_string()))
    }

    /// Strip the deployment base, query and fragment, and any trailing slash
    fn app_path(&self, requested: &str) -> String {
        let path = requested.split(['?', '#']).next().unwrap_or_default();

        let base = self.base_path.trim_end_matches('/');
        let path = if base.is_empty() {
            path
        } else if path == base {
            ROOT_PATH
        } else {
            path.strip_prefix(self.base_path.as_str()).unwrap_or(path)
        };

        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            ROOT_PATH.to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }
}
