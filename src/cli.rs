//! Command-line interface configuration.

use argh::FromArgs;
use std::{net::SocketAddr, path::PathBuf};

use crate::fixtures::{Dataset, Preset};

/// VOC dashboard access gate and fixture loader
#[derive(Debug, FromArgs)]
pub struct Cli {
    /// session state file (default: '.voc-dash/session.json')
    #[argh(
        option,
        long = "state-file",
        default = "PathBuf::from(\".voc-dash/session.json\")"
    )]
    pub state_file: PathBuf,

    /// origin fixtures are fetched from (e.g. '127.0.0.1:8000')
    #[argh(option)]
    pub origin: Option<String>,

    /// read fixtures straight from a public directory instead of over HTTP
    #[argh(option, long = "public-dir")]
    pub public_dir: Option<PathBuf>,

    /// fixture naming convention: standard, dpd or root (default: standard)
    #[argh(option, default = "Preset::Standard")]
    pub layout: Preset,

    /// JSON layout manifest, overrides --layout
    #[argh(option)]
    pub manifest: Option<PathBuf>,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand)]
pub enum Command {
    Login(LoginArgs),
    Logout(LogoutArgs),
    Status(StatusArgs),
    Open(OpenArgs),
    Fetch(FetchArgs),
    Datasets(DatasetsArgs),
    Serve(ServeArgs),
}

/// check credentials and start a session
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "login")]
pub struct LoginArgs {
    /// username
    #[argh(option)]
    pub username: String,

    /// password
    #[argh(option)]
    pub password: String,
}

/// end the current session
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "logout")]
pub struct LogoutArgs {}

/// show whether a session is active
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "status")]
pub struct StatusArgs {}

/// resolve a path through the route table and guard
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "open")]
pub struct OpenArgs {
    /// path to open (default: '/')
    #[argh(positional, default = "String::from(\"/\")")]
    pub path: String,
}

/// print one dataset as JSON (requires a session)
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "fetch")]
pub struct FetchArgs {
    /// dataset name (e.g. 'word-cloud')
    #[argh(positional)]
    pub dataset: Dataset,
}

/// list datasets and where they are read from
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "datasets")]
pub struct DatasetsArgs {}

/// serve a public directory under the base path
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "serve")]
pub struct ServeArgs {
    /// path to the public directory (e.g. 'public/')
    #[argh(option, long = "public-dir")]
    pub public_dir: PathBuf,

    /// server bind address (default: '127.0.0.1:8000')
    #[argh(option, default = "SocketAddr::from(([127, 0, 0, 1], 8000))")]
    pub bind: SocketAddr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::from_args(&["voc-dash"], &["--layout", "dpd", "fetch", "site-performance"])
            .unwrap();
        assert_eq!(cli.layout, Preset::Dpd);
        match cli.command {
            Command::Fetch(args) => assert_eq!(args.dataset, Dataset::SitePerformance),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_open_defaults_to_root() {
        let cli = Cli::from_args(&["voc-dash"], &["open"]).unwrap();
        assert_eq!(cli.state_file, PathBuf::from(".voc-dash/session.json"));
        match cli.command {
            Command::Open(args) => assert_eq!(args.path, "/"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_dataset_rejected() {
        assert!(Cli::from_args(&["voc-dash"], &["fetch", "nope"]).is_err());
    }
}
