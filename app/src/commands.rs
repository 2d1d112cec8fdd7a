//! Line commands
//!
//! One command per input line; every command answers with one JSON
//! `CommandResult` line.

use serde::Serialize;

use chess_core::{App, HistoryEntry, NavigationOutcome, SessionSnapshot, ROUTES};

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Login(String),
    Logout,
    Back,
    Forward,
    State,
    Routes,
    History,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match (name.to_lowercase().as_str(), arg) {
            ("go", "") => Err("usage: go <path>".to_string()),
            ("go", path) => Ok(Command::Go(path.to_string())),
            // Empty tokens are passed through so the session store can reject them
            ("login", token) => Ok(Command::Login(token.to_string())),
            ("logout", _) => Ok(Command::Logout),
            ("back", _) => Ok(Command::Back),
            ("forward", _) => Ok(Command::Forward),
            ("state", _) => Ok(Command::State),
            ("routes", _) => Ok(Command::Routes),
            ("history", _) => Ok(Command::History),
            ("quit" | "exit", _) => Ok(Command::Quit),
            (other, _) => Err(format!("Unknown command: {}", other)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub state: String,
    pub authenticated: bool,
    pub authenticated_at: Option<String>,
}

impl From<SessionSnapshot> for SessionInfo {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            state: snapshot.state.to_string(),
            authenticated: snapshot.is_authenticated(),
            authenticated_at: snapshot.authenticated_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StateInfo {
    pub session: SessionInfo,
    pub current: Option<NavigationOutcome>,
}

#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub pattern: &'static str,
    pub name: &'static str,
    pub view: String,
    pub loaded: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Navigation(NavigationOutcome),
    Session(SessionInfo),
    State(StateInfo),
    Routes(Vec<RouteInfo>),
    History(Vec<HistoryEntry>),
}

/// Run one command against the client
pub async fn execute(app: &App, command: Command) -> CommandResult<Reply> {
    let result = match command {
        Command::Go(path) => app.navigate(&path).await.map(Reply::Navigation),
        Command::Back => app.back().await.map(Reply::Navigation),
        Command::Forward => app.forward().await.map(Reply::Navigation),
        // The token itself is never echoed back
        Command::Login(token) => app.login(&token).map(|s| Reply::Session(s.into())),
        Command::Logout => Ok(Reply::Session(app.logout().into())),
        Command::State => Ok(Reply::State(StateInfo {
            session: app.session().snapshot().into(),
            current: app.current(),
        })),
        Command::Routes => Ok(Reply::Routes(
            ROUTES
                .iter()
                .map(|&(pattern, id)| RouteInfo {
                    pattern,
                    name: id.route_name(),
                    view: id.to_string(),
                    loaded: app.router().is_loaded(id.route_name()),
                })
                .collect(),
        )),
        Command::History => Ok(Reply::History(app.history())),
        Command::Quit => return CommandResult::err("quit is handled by the driver".to_string()),
    };

    match result {
        Ok(reply) => CommandResult::ok(reply),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Config;

    fn mounted() -> App {
        let app = App::new(Config::default()).unwrap();
        app.mount("#app").unwrap();
        app
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("go /faq"), Ok(Command::Go("/faq".to_string())));
        assert_eq!(
            Command::parse("  LOGIN  abc.def "),
            Ok(Command::Login("abc.def".to_string()))
        );
        assert_eq!(Command::parse("login"), Ok(Command::Login(String::new())));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
        assert!(Command::parse("go").is_err());
        assert!(Command::parse("fly /faq").is_err());
    }

    #[tokio::test]
    async fn test_execute_navigation() {
        let app = mounted();
        let result = execute(&app, Command::Go("/tournamentdetail/9".to_string())).await;
        assert!(result.success);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["data"]["view"], "tournament-detail");
        assert_eq!(json["data"]["params"]["id"], "9");
    }

    #[tokio::test]
    async fn test_execute_login_hides_token() {
        let app = mounted();
        let result = execute(&app, Command::Login("secret".to_string())).await;
        assert!(result.success);

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"authenticated\":true"));
    }

    #[tokio::test]
    async fn test_execute_reports_errors() {
        let app = mounted();
        let result = execute(&app, Command::Go("/nowhere".to_string())).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("/nowhere"));

        let result = execute(&app, Command::Login(String::new())).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_routes_report_lazy_loading() {
        let app = mounted();
        execute(&app, Command::Go("/faq".to_string())).await;

        let result = execute(&app, Command::Routes).await;
        let json = serde_json::to_value(&result).unwrap();
        let routes = json["data"].as_array().unwrap();
        assert_eq!(routes.len(), 6);

        let loaded: Vec<&str> = routes
            .iter()
            .filter(|r| r["loaded"] == true)
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(loaded, vec!["faq"]);
    }
}
