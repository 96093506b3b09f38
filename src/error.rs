//! Top-level error for the command-line front end.

use thiserror::Error;

use crate::config::ConfigError;
use crate::fixtures::FixtureError;
use crate::routes::NavigationError;
use crate::session::StoreError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("invalid layout manifest {path}: {reason}")]
    Manifest { path: String, reason: String },
    #[error("login failed")]
    LoginFailed,
    #[error("not signed in; run `login` first")]
    NotAuthenticated,
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
