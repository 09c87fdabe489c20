pub mod user;

use std::{
    io,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use derive_more::{Display, From};

use crate::config;

pub use self::user::User;

/// Seed compiled into the binary, used when no seed path is configured.
pub const BUNDLED_SEED: &str = include_str!("../../local_db/users.json");

#[derive(Debug, Display, From)]
pub enum Error {
    #[display("failed to read seed: {_0}")]
    Io(io::Error),
    #[display("malformed seed: {_0}")]
    Json(serde_json::Error),
    #[from(ignore)]
    #[display("user store lock is poisoned")]
    Poisoned,
}

impl std::error::Error for Error {}

/// Loads the seed described by `config` into a fresh [`Client`].
pub async fn connect(config: &config::Seed) -> Result<Client, Error> {
    let raw = match &config.path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => BUNDLED_SEED.to_owned(),
    };
    Client::from_seed(&raw)
}

/// In-memory user collection.
///
/// The lock is held for a single read or append only, so a request never
/// observes or leaves a half-applied mutation.
#[derive(Debug)]
pub struct Client(RwLock<Vec<User>>);

impl Client {
    pub fn new(users: Vec<User>) -> Self {
        Self(RwLock::new(users))
    }

    pub fn from_seed(raw: &str) -> Result<Self, Error> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<User>>, Error> {
        self.0.read().map_err(|_| Error::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>, Error> {
        self.0.write().map_err(|_| Error::Poisoned)
    }

    /// Poisons the lock by panicking while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.0.write();
            panic!("poisoning user store");
        }));
    }
}
