//! End-to-end flow through the public API: mount, navigate, log in and out.

use std::time::Duration;

use chess_core::{App, Config, CoreError, NavigationError, SessionState, ViewId};

fn mounted() -> App {
    let app = App::new(Config::default()).unwrap();
    app.mount("#app").unwrap();
    app
}

#[tokio::test]
async fn fresh_client_is_anonymous_and_lazy() {
    let app = mounted();

    let session = app.session();
    assert!(session.token().is_none());
    assert!(!session.is_authenticated());
    assert_eq!(session.state(), SessionState::Anonymous);

    assert!(app.router().routes().all(|r| !r.is_loaded()));
    assert!(app.current().is_none());
}

#[tokio::test]
async fn login_browse_logout() {
    let app = mounted();
    let mut updates = app.session().subscribe();

    app.navigate("/login").await.unwrap();
    app.login("token-A").unwrap();
    app.login("token-B").unwrap();

    assert_eq!(app.session().token().as_deref(), Some("token-B"));
    assert!(app.session().is_authenticated());
    assert!(updates.borrow_and_update().is_authenticated());

    let outcome = app.navigate("/tournamentdetail/42?tab=rounds").await.unwrap();
    assert_eq!(outcome.view, ViewId::TournamentDetail);
    assert_eq!(outcome.matched.params.get("id"), Some("42"));
    assert!(outcome.authenticated);

    // Observers learn about the logout triggered by the route
    let observer = tokio::spawn(async move {
        tokio::time::timeout(Duration::from_secs(1), updates.changed())
            .await
            .expect("Timeout waiting for logout")
            .expect("Watch channel closed");
        let snapshot = updates.borrow().clone();
        snapshot
    });

    app.navigate("/logout").await.unwrap();
    let seen = observer.await.unwrap();
    assert_eq!(seen.state, SessionState::Anonymous);
    assert!(seen.token.is_none());

    // Visiting logout again is harmless
    let outcome = app.navigate("/faq").await.unwrap();
    assert_eq!(outcome.view, ViewId::Faq);
    app.navigate("/logout").await.unwrap();
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn unknown_paths_do_not_resolve() {
    let app = mounted();

    for path in ["/players", "/tournamentdetail", "/faq/more"] {
        match app.navigate(path).await {
            Err(CoreError::Navigation(NavigationError::NotFound(_))) => {}
            other => panic!("Expected NotFound for {path}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn empty_token_leaves_session_untouched() {
    let app = mounted();
    app.login("valid").unwrap();

    assert!(app.login("").is_err());
    assert_eq!(app.session().token().as_deref(), Some("valid"));
}
