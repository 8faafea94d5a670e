use crate::error::{AppError, Result};
use crate::models::User;

use super::{decode, encode, Store};

const USERS_KEY: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Insert a user; the email must not be registered yet
    pub async fn create_user(&self, user: &User) -> Result<()> {
        if !self
            .store
            .hash_set_nx(USERS_KEY, &user.email, &encode(user)?)
            .await?
        {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        tracing::info!(email = %user.email, "User registered");
        Ok(())
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<User>> {
        match self.store.hash_get(USERS_KEY, email).await? {
            Some(json) => Ok(Some(decode(&json)?)),
            None => Ok(None),
        }
    }
}
