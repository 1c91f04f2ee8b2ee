use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::types::{User, UserError, UserRepository};

/// In-memory user repository, persisted as JSON by [`super::save_user_store`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStore {
    pub version: u32,
    next_id: i64,
    #[serde(default)]
    users: Vec<User>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create a new empty store with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            next_id: 1,
            users: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Check records read from disk: ids and emails must be unique.
    ///
    /// Returns every duplicate found. On success `next_id` is raised past the
    /// highest stored id so `create` never hands out a taken id.
    pub(super) fn check_integrity(&mut self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();

        for user in &self.users {
            if !ids.insert(user.id) {
                errors.push(format!("users: duplicate id {}", user.id));
            }
            if !emails.insert(user.email.as_str()) {
                errors.push(format!("users: duplicate email {}", user.email));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(max_id) = self.users.iter().map(|u| u.id).max() {
            self.next_id = self.next_id.max(max_id + 1);
        }
        Ok(())
    }

    fn position(&self, id: i64) -> Result<usize, UserError> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or(UserError::NotFound { id })
    }

    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except_id)
    }
}

impl UserRepository for UserStore {
    fn get_by_id(&self, id: i64) -> Result<User, UserError> {
        self.position(id).map(|i| self.users[i].clone())
    }

    fn get_by_email(&self, email: &str) -> Result<User, UserError> {
        self.users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| UserError::EmailNotFound {
                email: email.to_string(),
            })
    }

    fn create(&mut self, email: &str, name: &str) -> Result<User, UserError> {
        if self.email_taken(email, None) {
            return Err(UserError::DuplicateEmail {
                email: email.to_string(),
            });
        }

        let user = User {
            id: self.next_id,
            email: email.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        // Ids are never reused, even after deletes
        self.next_id += 1;
        self.users.push(user.clone());
        Ok(user)
    }

    fn update(&mut self, id: i64, email: &str, name: &str) -> Result<(), UserError> {
        let index = self.position(id)?;
        if self.email_taken(email, Some(id)) {
            return Err(UserError::DuplicateEmail {
                email: email.to_string(),
            });
        }

        let user = &mut self.users[index];
        user.email = email.to_string();
        user.name = name.to_string();
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<(), UserError> {
        let index = self.position(id)?;
        self.users.remove(index);
        Ok(())
    }

    fn list(&self) -> Vec<User> {
        let mut users = self.users.clone();
        users.sort_by_key(|u| u.id);
        users
    }
}
