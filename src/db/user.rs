use std::fmt;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Client, Error};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: u64,
    pub role: Role,
}

/// Identifier of a [`User`].
///
/// Seeded users carry small integers, users created through the API get a
/// random UUID. Both shapes are kept on the wire.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(untagged)]
pub enum Id {
    Numeric(i64),
    Generated(Uuid),
}

impl Id {
    pub fn new() -> Self {
        Self::Generated(Uuid::new_v4())
    }

    /// Parses a path segment: a base-10 integer or a canonical UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(n) = raw.parse::<i64>() {
            return Some(Self::Numeric(n));
        }
        Uuid::try_parse(raw).ok().map(Self::Generated)
    }

    /// Whether `raw` is a base-10 integer, whether or not it fits an `i64`.
    pub fn is_integer(raw: &str) -> bool {
        let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

#[derive(
    Clone, Copy, Debug, Deserialize, enum_utils::FromStr, Eq, PartialEq,
    Serialize,
)]
pub enum Role {
    Administrator,
    Estudiante,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Administrator, Self::Estudiante];

    pub fn label(self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Estudiante => "Estudiante",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Client {
    pub fn get_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.read()?.clone())
    }

    pub fn get_user_by_id(&self, id: Id) -> Result<Option<User>, Error> {
        Ok(self.read()?.iter().find(|u| u.id == id).cloned())
    }

    pub fn write_user(&self, user: &User) -> Result<(), Error> {
        self.write()?.push(user.clone());
        Ok(())
    }
}
