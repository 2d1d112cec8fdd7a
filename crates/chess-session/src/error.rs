//! Session error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Token cannot be empty")]
    EmptyToken,
}
