use anyhow::Result;
use shared::User as SharedUser;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::{read_json, write_json};
use crate::domain::models::User;
use crate::io::mappers::UserMapper;
use crate::storage::keys::{CURRENT_USER_KEY, USERS_KEY};
use crate::storage::traits::KeyValueStorage;

/// Repository for registered students (`attendanceUsers`) and the session
/// (`currentUser`).
#[derive(Clone)]
pub struct UserRepository<S: KeyValueStorage> {
    connection: S,
}

impl<S: KeyValueStorage> UserRepository<S> {
    pub fn new(connection: S) -> Self {
        Self { connection }
    }

    async fn read_users(&self) -> Result<BTreeMap<String, SharedUser>> {
        Ok(read_json(&self.connection, USERS_KEY).await?.unwrap_or_default())
    }

    /// Every registered student, ordered by student id
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.read_users()
            .await?
            .into_values()
            .map(UserMapper::to_domain)
            .collect()
    }

    pub async fn get_user(&self, student_id: &str) -> Result<Option<User>> {
        self.read_users()
            .await?
            .remove(student_id)
            .map(UserMapper::to_domain)
            .transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.list_users().await?.into_iter().find(|u| u.email == email))
    }

    /// Insert or replace a student in the users map
    pub async fn store_user(&self, user: &User) -> Result<()> {
        let mut users = self.read_users().await?;
        users.insert(user.student_id.clone(), UserMapper::to_dto(user.clone()));
        write_json(&self.connection, USERS_KEY, &users).await?;

        info!("Stored student {} ({} registered)", user.student_id, users.len());
        Ok(())
    }

    pub async fn current_user(&self) -> Result<Option<User>> {
        read_json::<_, SharedUser>(&self.connection, CURRENT_USER_KEY)
            .await?
            .map(UserMapper::to_domain)
            .transpose()
    }

    pub async fn set_current_user(&self, user: &User) -> Result<()> {
        debug!("Setting current user to {}", user.student_id);
        write_json(&self.connection, CURRENT_USER_KEY, &UserMapper::to_dto(user.clone())).await
    }

    /// Returns true if a session was stored
    pub async fn clear_current_user(&self) -> Result<bool> {
        self.connection.delete_value(CURRENT_USER_KEY).await
    }
}
