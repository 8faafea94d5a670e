use crate::error::Result;
use crate::session::Session;

use super::{decode, encode, Store};

const SESSIONS_KEY: &str = "sessions";

/// Navigation state per signed-in user
#[derive(Clone)]
pub struct SessionRepository {
    store: Store,
}

impl SessionRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn save_session(&self, session: &Session) -> Result<()> {
        self.store
            .hash_set(SESSIONS_KEY, &session.email, &encode(session)?)
            .await
    }

    pub async fn get_session(&self, email: &str) -> Result<Option<Session>> {
        match self.store.hash_get(SESSIONS_KEY, email).await? {
            Some(json) => Ok(Some(decode(&json)?)),
            None => Ok(None),
        }
    }
}
