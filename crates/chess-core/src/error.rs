//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] chess_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] chess_navigation::NavigationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown mount point '{requested}', expected '{expected}'")]
    MountPoint { requested: String, expected: String },

    #[error("Application already mounted on {0}")]
    AlreadyMounted(String),

    #[error("Application not mounted")]
    NotMounted,

    #[error("Missing route parameter: {0}")]
    MissingParam(String),
}
