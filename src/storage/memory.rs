//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::notes::Note;
use crate::users::User;

use super::CreateNoteValues;
use super::CreateUserValues;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug)]
pub struct Memory {
    /// All users in storage, notes embedded
    users: Arc<Mutex<HashMap<Uuid, User>>>,

    /// All tokens invalidated by a logout
    revoked_tokens: Arc<Mutex<HashSet<String>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            revoked_tokens: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl Storage for Memory {
    async fn find_single_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_single_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().await.get(id).cloned())
    }

    async fn create_user(&self, values: &CreateUserValues) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            first_name: values.first_name.to_string(),
            last_name: values.last_name.to_string(),
            email: values.email.to_string(),
            hashed_password: values.hashed_password.to_string(),
            notes: Vec::new(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };

        self.users.lock().await.insert(user.id, user.clone());

        Ok(user)
    }

    async fn create_note(&self, user: &User, values: &CreateNoteValues) -> Result<Note> {
        let note = Note {
            id: Uuid::new_v4(),
            title: values.title.to_string(),
            content: values.content.to_string(),
        };

        self.users
            .lock()
            .await
            .get_mut(&user.id)
            .map(|user| {
                user.notes.push(note.clone());
                user.updated_at = Utc::now().naive_utc();
            })
            .expect("HashMap is the source of the user");

        Ok(note)
    }

    async fn update_note(
        &self,
        user: &User,
        note_id: &Uuid,
        values: &UpdateNoteValues,
    ) -> Result<Option<Note>> {
        let mut users = self.users.lock().await;

        let Some(user) = users.get_mut(&user.id) else {
            return Ok(None);
        };

        let Some(note) = user.notes.iter_mut().find(|note| &note.id == note_id) else {
            return Ok(None);
        };

        note.title = values.title.to_string();
        note.content = values.content.to_string();
        let note = note.clone();

        user.updated_at = Utc::now().naive_utc();

        Ok(Some(note))
    }

    async fn delete_note(&self, user: &User, note_id: &Uuid) -> Result<Option<Note>> {
        let mut users = self.users.lock().await;

        let Some(user) = users.get_mut(&user.id) else {
            return Ok(None);
        };

        let Some(index) = user.notes.iter().position(|note| &note.id == note_id) else {
            return Ok(None);
        };

        // Vec::remove keeps the relative order of the remaining notes
        let note = user.notes.remove(index);
        user.updated_at = Utc::now().naive_utc();

        Ok(Some(note))
    }

    async fn revoke_token(&self, token: &str) -> Result<()> {
        self.revoked_tokens.lock().await.insert(token.to_string());

        Ok(())
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool> {
        Ok(self.revoked_tokens.lock().await.contains(token))
    }
}
