//! Route table of the client

use std::time::Duration;

use chess_navigation::{Route, Router};

use crate::views::{load_view, View, ViewId};
use crate::Result;

/// Declared routes, in match order
pub const ROUTES: [(&str, ViewId); 6] = [
    ("/", ViewId::Home),
    ("/login", ViewId::Login),
    ("/tournamentdetail/:id", ViewId::TournamentDetail),
    ("/logout", ViewId::Logout),
    ("/faq", ViewId::Faq),
    ("/createtournament", ViewId::CreateTournament),
];

/// Build the router with every declared route; views load on first visit.
pub fn build_router(load_timeout: Duration) -> Result<Router<dyn View>> {
    let mut router = Router::new(load_timeout);

    for (pattern, id) in ROUTES {
        router.add_route(Route::new(id.route_name(), pattern, move || load_view(id))?)?;
    }

    tracing::debug!(routes = ROUTES.len(), "Route table built");
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router<dyn View> {
        build_router(Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_declared_routes() {
        let router = router();
        let names: Vec<&str> = router.routes().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "home",
                "loginView",
                "tournamentDetailView",
                "logout",
                "faq",
                "createTournament"
            ]
        );
    }

    #[test]
    fn test_resolve_faq() {
        let matched = router().resolve("/faq").unwrap();
        assert_eq!(ViewId::from_route_name(&matched.route_name), Some(ViewId::Faq));
        assert!(matched.params.is_empty());
    }

    #[test]
    fn test_resolve_tournament_detail() {
        let matched = router().resolve("/tournamentdetail/42").unwrap();
        assert_eq!(
            ViewId::from_route_name(&matched.route_name),
            Some(ViewId::TournamentDetail)
        );
        assert_eq!(matched.params.get("id"), Some("42"));
    }

    #[test]
    fn test_no_catch_all() {
        assert!(router().resolve("/players").is_err());
        assert!(router().resolve("/tournamentdetail/1/rounds").is_err());
    }

    #[tokio::test]
    async fn test_nothing_loaded_until_visited() {
        let router = router();
        assert!(router.routes().all(|r| !r.is_loaded()));

        let nav = router.navigate("/createtournament").await.unwrap();
        assert_eq!(nav.view.id(), ViewId::CreateTournament);
        assert!(router.is_loaded("createTournament"));
        assert!(!router.is_loaded("home"));
    }
}
