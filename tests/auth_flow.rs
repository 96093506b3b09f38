//! End-to-end session scenarios: login, guarded navigation, logout

use nanoid::nanoid;
use std::path::{Path, PathBuf};
use voc_dash::auth::CredentialGate;
use voc_dash::config::{Config, Credentials};
use voc_dash::routes::{Navigator, View};
use voc_dash::session::{FileStore, SESSION_KEY, SessionStore};

fn state_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("voc-dash-auth-{}", nanoid!(8)))
        .join("session.json")
}

fn file_gate(path: &Path) -> CredentialGate<FileStore> {
    CredentialGate::new(Credentials::new("admin", "secret"), FileStore::new(path))
}

#[tokio::test]
async fn test_login_navigate_logout() {
    let path = state_file();
    let gate = file_gate(&path);
    let nav = Navigator::new(&gate, "/voc-analyse-sentiment/");

    assert_eq!(nav.navigate("/dashboard").unwrap().view, View::Login);

    assert!(gate.login("admin", "secret").await);
    gate.remember().unwrap();
    assert!(gate.is_authenticated());
    assert_eq!(nav.navigate("/dashboard").unwrap().view, View::Dashboard);
    assert_eq!(nav.navigate("/login").unwrap().view, View::Dashboard);

    assert!(!gate.login("admin", "wrong").await);
    // A failed attempt leaves an existing session alone
    assert!(gate.is_authenticated());

    gate.logout().unwrap();
    assert!(!gate.is_authenticated());
    assert_eq!(nav.navigate("/").unwrap().view, View::Login);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let path = state_file();

    {
        let gate = file_gate(&path);
        assert!(gate.login("admin", "secret").await);
        gate.remember().unwrap();
    }

    let restarted = file_gate(&path);
    assert!(restarted.is_authenticated());
    assert_eq!(
        restarted.store().get(SESSION_KEY).as_deref(),
        Some("true")
    );

    restarted.logout().unwrap();
    assert!(!file_gate(&path).is_authenticated());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_tampered_flag_is_not_a_session() {
    let path = state_file();
    let gate = file_gate(&path);

    gate.store().set(SESSION_KEY, "yes").unwrap();
    assert!(!gate.is_authenticated());
    assert_eq!(
        Navigator::new(&gate, "/").navigate("/dashboard").unwrap().view,
        View::Login
    );

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_gate_from_unconfigured_environment_rejects_login() {
    let config = Config::from_lookup(|_| None).unwrap();
    let gate = CredentialGate::new(config.credentials, FileStore::new(state_file()));

    assert!(!gate.login("", "").await);
    assert!(!gate.login("admin", "secret").await);
    assert!(!gate.is_authenticated());
}
