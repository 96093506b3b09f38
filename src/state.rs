//! Shared state for the fixture server.

use std::path::PathBuf;

/// Shared application state accessible to all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Deployment base path the public directory is mounted at (e.g. "/voc-analyse-sentiment/")
    pub base_path: String,
    /// Root of the served files, fixtures under `mocked-api/` included
    pub public_dir: PathBuf,
}
