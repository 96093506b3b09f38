//! Command-line host for the VOC dashboard access layer.
//!
//! Features:
//! - Credential login/logout with a session flag persisted on disk
//! - Route resolution through the authentication guard
//! - Fixture loading over HTTP or straight from a public directory
//! - A static server for the public directory, with colored request tracing

use std::{fs, process::ExitCode, sync::Arc};
use tokio::net::TcpListener;
use tracing::{Level, error, info};

use voc_dash::{
    auth::CredentialGate,
    cli::{Cli, Command},
    config::Config,
    error::{Error, Result},
    fixtures::{FixtureClient, Layout, Source},
    routes::{DASHBOARD_PATH, Navigator, View},
    server,
    session::FileStore,
    state::AppState,
};

/// Default origin, matching the `serve` subcommand's default bind address
const DEFAULT_ORIGIN: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Cli = argh::from_env();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let gate = CredentialGate::new(
        config.credentials.clone(),
        FileStore::new(&args.state_file),
    );
    let navigator = Navigator::new(&gate, config.base_path.as_str());

    match &args.command {
        Command::Login(login) => {
            if !gate.login(&login.username, &login.password).await {
                return Err(Error::LoginFailed);
            }
            gate.remember()?;
            println!("Signed in as {}", login.username);
        }
        Command::Logout(_) => {
            gate.logout()?;
            println!("Signed out");
        }
        Command::Status(_) => {
            if gate.is_authenticated() {
                println!("authenticated");
            } else {
                println!("not authenticated");
            }
        }
        Command::Open(open) => {
            let resolved = navigator.navigate(&open.path)?;
            for hop in &resolved.redirects {
                println!("{} →", hop);
            }
            println!("{} ({})", resolved.path, resolved.view);
        }
        Command::Fetch(fetch) => {
            // Data is only reachable from the dashboard view
            let resolved = navigator.navigate(DASHBOARD_PATH)?;
            if resolved.view != View::Dashboard {
                return Err(Error::NotAuthenticated);
            }
            let client = fixture_client(&args, &config)?;
            let value = client.fetch(fetch.dataset).await?;
            println!("{:#}", value);
        }
        Command::Datasets(_) => {
            let client = fixture_client(&args, &config)?;
            for dataset in client.layout().datasets() {
                let location = client.location(dataset).unwrap_or_default();
                println!("{:<24} {}", dataset, location);
            }
        }
        Command::Serve(serve) => {
            let public_dir = serve.public_dir.canonicalize()?;
            let state = Arc::new(AppState {
                base_path: config.base_path.clone(),
                public_dir,
            });
            let listener = TcpListener::bind(serve.bind).await?;
            server::run(listener, state).await?;
        }
    }

    Ok(())
}

fn fixture_client(args: &Cli, config: &Config) -> Result<FixtureClient> {
    let layout = match &args.manifest {
        Some(path) => {
            let manifest_err = |reason: String| Error::Manifest {
                path: path.display().to_string(),
                reason,
            };
            let raw = fs::read_to_string(path).map_err(|e| manifest_err(e.to_string()))?;
            Layout::from_manifest(&raw).map_err(|e| manifest_err(e.to_string()))?
        }
        None => Layout::preset(args.layout, &config.base_path),
    };

    let source = match (&args.public_dir, &args.origin) {
        (Some(dir), _) => Source::directory(dir),
        (None, Some(origin)) => Source::http(origin),
        (None, None) => Source::http(DEFAULT_ORIGIN),
    };

    info!("Reading fixtures from {:?} (base {})", source, layout.base_path());
    Ok(FixtureClient::new(layout, source))
}
