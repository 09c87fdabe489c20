//! Wire representation shared by every JSON response.

pub mod user;

use serde::{Deserialize, Serialize};

pub use self::user::User;

/// `{ "success": true, "data": ... }`
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": false, "message": ... }`
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: Message,
}

impl Failure {
    pub fn new(message: impl Into<Message>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Violations(Vec<Violation>),
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Vec<Violation>> for Message {
    fn from(value: Vec<Violation>) -> Self {
        Self::Violations(value)
    }
}

/// A single failed rule of an input field.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Violation {
    pub message: String,
    /// Offending field, absent when the input as a whole is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Violation {
    pub fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.to_owned()),
        }
    }
}
