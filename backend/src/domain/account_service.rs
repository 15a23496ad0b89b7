//! Registration, login and the persisted session.
//!
//! Students live in one map keyed by student id. Registering logs the new
//! student in; the session is the stored `currentUser` record, so it survives
//! a restart until `logout`.

use std::sync::Arc;
use tracing::{info, warn};

use super::clock::Clock;
use super::commands::account::RegisterCommand;
use super::error::{AccountError, ServiceResult};
use super::models::User;
use crate::storage::{KeyValueStorage, UserRepository};

#[derive(Clone)]
pub struct AccountService<S: KeyValueStorage> {
    user_repository: UserRepository<S>,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStorage> AccountService<S> {
    pub fn new(connection: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repository: UserRepository::new(connection),
            clock,
        }
    }

    /// Register a new student and log them in.
    pub async fn register(&self, command: RegisterCommand) -> ServiceResult<User> {
        info!("Registering student {}", command.student_id);

        if self.user_repository.get_user(&command.student_id).await?.is_some() {
            warn!("Student id {} is already registered", command.student_id);
            return Err(AccountError::StudentIdTaken.into());
        }
        if self.user_repository.find_by_email(&command.email).await?.is_some() {
            warn!("Email for {} is already registered", command.student_id);
            return Err(AccountError::EmailTaken.into());
        }

        let user = User {
            student_id: command.student_id,
            name: command.name,
            email: command.email,
            password: command.password,
            created_at: self.clock.now(),
        };

        self.user_repository.store_user(&user).await?;
        self.user_repository.set_current_user(&user).await?;
        Ok(user)
    }

    pub async fn login(&self, student_id: &str, password: &str) -> ServiceResult<User> {
        let user = match self.user_repository.get_user(student_id).await? {
            Some(user) if user.password_matches(password) => user,
            _ => {
                warn!("Failed login for {}", student_id);
                return Err(AccountError::InvalidCredentials.into());
            }
        };

        self.user_repository.set_current_user(&user).await?;
        info!("Student {} logged in", student_id);
        Ok(user)
    }

    /// End the session. Returns true if someone was logged in.
    pub async fn logout(&self) -> ServiceResult<bool> {
        let had_session = self.user_repository.clear_current_user().await?;
        info!("Logged out (session present: {})", had_session);
        Ok(had_session)
    }

    /// The stored session, if any
    pub async fn current_user(&self) -> ServiceResult<Option<User>> {
        Ok(self.user_repository.current_user().await?)
    }
}
