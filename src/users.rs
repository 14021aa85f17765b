use chrono::naive::NaiveDateTime;
use uuid::Uuid;

use crate::notes::Note;

#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Globally unique
    pub email: String,
    pub hashed_password: String,
    /// Embedded notes, in insertion order
    pub notes: Vec<Note>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
