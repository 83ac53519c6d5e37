use crate::{FileTokenStore, MemoryTokenStore, SessionManager, SessionState};

fn manager_with_stored_token(token: &str) -> SessionManager {
    SessionManager::new(Box::new(MemoryTokenStore::with_token(token))).unwrap()
}

#[test]
fn given_empty_store_when_restored_then_session_is_anonymous() {
    let session = SessionManager::new(Box::new(MemoryTokenStore::new())).unwrap();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.token().is_none());
}

#[test]
fn given_stored_token_when_restored_then_session_is_validating() {
    let session = manager_with_stored_token("stored-token");

    assert_eq!(session.state(), SessionState::Validating);
    assert_eq!(session.token(), Some("stored-token"));
    assert!(!session.is_authenticated());
}

#[test]
fn given_validating_session_when_validation_succeeds_then_authenticated() {
    let mut session = manager_with_stored_token("stored-token");

    let pending = session.begin_validation().unwrap();
    assert_eq!(pending.token(), "stored-token");

    session.finish_validation(pending, true).unwrap();

    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.token(), Some("stored-token"));
}

#[test]
fn given_validating_session_when_validation_fails_then_anonymous_and_store_cleared() {
    let mut session = manager_with_stored_token("stored-token");

    let pending = session.begin_validation().unwrap();
    session.finish_validation(pending, false).unwrap();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.token().is_none());
}

#[test]
fn given_anonymous_session_when_begin_validation_then_nothing_to_validate() {
    let mut session = SessionManager::new(Box::new(MemoryTokenStore::new())).unwrap();

    assert!(session.begin_validation().is_none());
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[test]
fn given_in_flight_validation_when_logout_then_stale_success_is_discarded() {
    let mut session = manager_with_stored_token("stored-token");

    let pending = session.begin_validation().unwrap();
    session.logout().unwrap();
    assert_eq!(session.state(), SessionState::Anonymous);

    // The server said yes, but the user already logged out.
    session.finish_validation(pending, true).unwrap();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.token().is_none());
}

#[test]
fn given_in_flight_validation_when_new_login_then_stale_failure_is_discarded() {
    let mut session = manager_with_stored_token("old-token");

    let pending = session.begin_validation().unwrap();
    session.login("new-token").unwrap();

    // A rejection of the old token must not tear down the new session.
    session.finish_validation(pending, false).unwrap();

    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.token(), Some("new-token"));
}

#[test]
fn given_login_then_token_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.token");

    let mut session =
        SessionManager::new(Box::new(FileTokenStore::at(path.clone()))).unwrap();
    session.login("issued-token").unwrap();
    assert!(session.is_authenticated());

    let restored = SessionManager::new(Box::new(FileTokenStore::at(path))).unwrap();
    assert_eq!(restored.state(), SessionState::Validating);
    assert_eq!(restored.token(), Some("issued-token"));
}

#[test]
fn given_authenticated_session_when_expired_then_anonymous() {
    let mut session = manager_with_stored_token("stored-token");
    let pending = session.begin_validation().unwrap();
    session.finish_validation(pending, true).unwrap();
    assert!(session.is_authenticated());

    session.expire().unwrap();

    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.token().is_none());
}

#[test]
fn given_launch_url_token_when_restored_then_it_wins_over_stored_token() {
    let mut url = reqwest::Url::parse("http://127.0.0.1:5000/?token=handoff-token").unwrap();
    let session =
        SessionManager::with_launch_url(Box::new(MemoryTokenStore::with_token("stored")), &mut url)
            .unwrap();

    assert_eq!(session.state(), SessionState::Validating);
    assert_eq!(session.token(), Some("handoff-token"));
    assert!(url.query().is_none());
}

#[test]
fn given_launch_url_without_token_when_restored_then_stored_token_is_kept() {
    let mut url = reqwest::Url::parse("http://127.0.0.1:5000/?tab=deck").unwrap();
    let session =
        SessionManager::with_launch_url(Box::new(MemoryTokenStore::with_token("stored")), &mut url)
            .unwrap();

    assert_eq!(session.token(), Some("stored"));
    assert_eq!(url.query(), Some("tab=deck"));
}
