//! Client views
//!
//! Views own no rendering here; they expose the hooks the navigation flow
//! drives when a route is entered.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chess_navigation::{LoadError, Params};
use chess_session::SessionStore;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    Home,
    Login,
    TournamentDetail,
    Logout,
    Faq,
    CreateTournament,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::Home,
        ViewId::Login,
        ViewId::TournamentDetail,
        ViewId::Logout,
        ViewId::Faq,
        ViewId::CreateTournament,
    ];

    /// Route name the view is registered under
    pub fn route_name(&self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Login => "loginView",
            ViewId::TournamentDetail => "tournamentDetailView",
            ViewId::Logout => "logout",
            ViewId::Faq => "faq",
            ViewId::CreateTournament => "createTournament",
        }
    }

    pub fn from_route_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.route_name() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Login => "login",
            ViewId::TournamentDetail => "tournament-detail",
            ViewId::Logout => "logout",
            ViewId::Faq => "faq",
            ViewId::CreateTournament => "create-tournament",
        }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a view sees when its route is entered
pub struct ViewContext<'a> {
    pub session: &'a SessionStore,
    pub params: &'a Params,
    pub query: &'a [(String, String)],
}

impl ViewContext<'_> {
    pub fn param(&self, name: &str) -> Result<&str> {
        self.params
            .get(name)
            .ok_or_else(|| CoreError::MissingParam(name.to_string()))
    }
}

pub trait View: Send + Sync {
    fn id(&self) -> ViewId;

    fn title(&self) -> &str;

    /// Called every time navigation lands on this view
    fn enter(&self, _ctx: &ViewContext<'_>) -> Result<()> {
        Ok(())
    }
}

pub struct HomeView;

impl View for HomeView {
    fn id(&self) -> ViewId {
        ViewId::Home
    }

    fn title(&self) -> &str {
        "Home"
    }
}

pub struct LoginView;

impl View for LoginView {
    fn id(&self) -> ViewId {
        ViewId::Login
    }

    fn title(&self) -> &str {
        "Log in"
    }
}

pub struct TournamentDetailView;

impl View for TournamentDetailView {
    fn id(&self) -> ViewId {
        ViewId::TournamentDetail
    }

    fn title(&self) -> &str {
        "Tournament"
    }

    fn enter(&self, ctx: &ViewContext<'_>) -> Result<()> {
        let id = ctx.param("id")?;
        tracing::debug!(tournament_id = %id, "Showing tournament detail");
        Ok(())
    }
}

/// Entering the logout route ends the session.
pub struct LogoutView;

impl View for LogoutView {
    fn id(&self) -> ViewId {
        ViewId::Logout
    }

    fn title(&self) -> &str {
        "Log out"
    }

    fn enter(&self, ctx: &ViewContext<'_>) -> Result<()> {
        ctx.session.logout();
        Ok(())
    }
}

pub struct FaqView;

impl View for FaqView {
    fn id(&self) -> ViewId {
        ViewId::Faq
    }

    fn title(&self) -> &str {
        "FAQ"
    }
}

pub struct CreateTournamentView;

impl View for CreateTournamentView {
    fn id(&self) -> ViewId {
        ViewId::CreateTournament
    }

    fn title(&self) -> &str {
        "Create tournament"
    }
}

/// Build a view's implementation. Used as the route loader.
pub async fn load_view(id: ViewId) -> std::result::Result<Arc<dyn View>, LoadError> {
    tracing::debug!(view = %id, "Loading view implementation");

    let view: Arc<dyn View> = match id {
        ViewId::Home => Arc::new(HomeView),
        ViewId::Login => Arc::new(LoginView),
        ViewId::TournamentDetail => Arc::new(TournamentDetailView),
        ViewId::Logout => Arc::new(LogoutView),
        ViewId::Faq => Arc::new(FaqView),
        ViewId::CreateTournament => Arc::new(CreateTournamentView),
    };

    Ok(view)
}
