use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UserError {
    #[error("user not found: id {id}")]
    NotFound { id: i64 },

    #[error("user not found: {email}")]
    EmailNotFound { email: String },

    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },
}

/// CRUD access to user records.
///
/// Emails are unique across all users. `list` returns users ordered by id,
/// which is also insertion order.
pub trait UserRepository {
    fn get_by_id(&self, id: i64) -> Result<User, UserError>;
    fn get_by_email(&self, email: &str) -> Result<User, UserError>;
    fn create(&mut self, email: &str, name: &str) -> Result<User, UserError>;
    fn update(&mut self, id: i64, email: &str, name: &str) -> Result<(), UserError>;
    fn delete(&mut self, id: i64) -> Result<(), UserError>;
    fn list(&self) -> Vec<User>;
}
