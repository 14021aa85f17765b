//! All things related to the storage of users and revoked tokens

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::notes::Note;
use crate::users::User;

pub use memory::Memory;

mod memory;

/// Setup the storage
#[allow(clippy::unused_async)]
pub async fn setup() -> Memory {
    Memory::new()
}

/// Storage errors
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a User
pub struct CreateUserValues<'a> {
    /// First name of the user
    pub first_name: &'a str,

    /// Last name of the user
    pub last_name: &'a str,

    /// The email address, must be unique
    pub email: &'a str,

    /// The hashed password
    pub hashed_password: &'a str,
}

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Title of the note
    pub title: &'a str,

    /// Content of the note
    ///
    /// Can be anything
    pub content: &'a str,
}

/// Values to update a Note
///
/// Both fields are replaced as-is, there is no partial update
pub struct UpdateNoteValues<'a> {
    /// New title of the note
    pub title: &'a str,

    /// New content of the note
    pub content: &'a str,
}

/// Storage with all supported operations
///
/// Users own their notes as an embedded list, every note operation is scoped
/// to a single user record and saved as a whole
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find a single user by their email address
    async fn find_single_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find a single user by their ID
    async fn find_single_user_by_id(&self, id: &Uuid) -> Result<Option<User>>;

    /// Create a single user
    async fn create_user(&self, values: &CreateUserValues) -> Result<User>;

    /// Append a note to a user's note list
    async fn create_note(&self, user: &User, values: &CreateNoteValues) -> Result<Note>;

    /// Overwrite a note in a user's note list
    ///
    /// The lookup only considers the given user's own notes, a note of
    /// another user is `None` here
    async fn update_note(
        &self,
        user: &User,
        note_id: &Uuid,
        values: &UpdateNoteValues,
    ) -> Result<Option<Note>>;

    /// Remove a note from a user's note list
    ///
    /// The remaining notes keep their relative order
    async fn delete_note(&self, user: &User, note_id: &Uuid) -> Result<Option<Note>>;

    /// Record a token on the blacklist
    ///
    /// Recording the same token twice leaves the blacklist as-is
    async fn revoke_token(&self, token: &str) -> Result<()>;

    /// Check whether a token was recorded on the blacklist
    async fn is_token_revoked(&self, token: &str) -> Result<bool>;
}
