//! Notes API management
//!
//! All operations work on the note list embedded in the current user's own
//! record, a note of another user is simply not found here.

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::notes::Note;
use crate::storage::CreateNoteValues;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;
use crate::users::User;

use super::CurrentUser;
use super::Error;
use super::Form;
use super::Message;
use super::PathParameters;
use super::Success;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

impl NoteResponse {
    pub(super) fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
        }
    }

    pub(super) fn from_note_multiple(mut notes: Vec<Note>) -> Vec<Self> {
        notes.drain(..).map(Self::from_note).collect::<Vec<Self>>()
    }
}

/// The full note list of the current user
#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    notes: Vec<NoteResponse>,
}

/// A single note, wrapped the way the endpoints respond with one
#[derive(Debug, Serialize)]
pub struct SingleNoteResponse {
    note: NoteResponse,
}

/// List all notes of the current user
///
/// The notes come back in insertion order, an empty list is a valid answer
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/notes
/// ```
///
/// Response:
/// ```json
/// { "notes": [ { "id": "<uuid>", "title": "some title", "content": "some content" } ] }
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser<S>,
) -> Result<Success<NoteListResponse>, Error> {
    let Some(user) = fetch_user(&storage, current_user.id()).await? else {
        return Err(Error::unauthorized("Unauthorized"));
    };

    Ok(Success::ok(NoteListResponse {
        notes: NoteResponse::from_note_multiple(user.notes),
    }))
}

/// Create note form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteForm {
    /// Title of the note
    title: String,

    /// Content of the note
    content: String,
}

/// Create a note for the current user
///
/// Repeated calls create distinct notes, there is no dedupe on title or
/// content
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "title": "some title", "content": "some content" }' \
///     http://localhost:6000/notes
/// ```
///
/// Response:
/// ```json
/// { "note": { "id": "<uuid>", "title": "some title", "content": "some content" } }
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser<S>,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<SingleNoteResponse>, Error> {
    if form.title.is_empty() || form.content.is_empty() {
        return Err(Error::bad_request(
            "Title and content are required for creating a note.",
        ));
    }

    let Some(user) = fetch_user(&storage, current_user.id()).await? else {
        return Err(Error::not_found("User not found"));
    };

    let values = CreateNoteValues {
        title: &form.title,
        content: &form.content,
    };

    let note = storage
        .create_note(&user, &values)
        .await
        .map_err(Error::internal)?;

    Ok(Success::created(SingleNoteResponse {
        note: NoteResponse::from_note(note),
    }))
}

/// Update note form
///
/// Both fields are replaced as-is, leaving one out clears it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    /// New title of the note
    title: Option<String>,

    /// New content of the note
    content: Option<String>,
}

/// Update a note of the current user
///
/// The note lookup is scoped to the current user's own notes
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "title": "new title", "content": "new content" }' \
///     http://localhost:6000/notes/<uuid>
/// ```
///
/// Response:
/// ```json
/// { "note": { "id": "<uuid>", "title": "new title", "content": "new content" } }
/// ```
pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser<S>,
    PathParameters(note_id): PathParameters<Uuid>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<SingleNoteResponse>, Error> {
    let Some(user) = fetch_user(&storage, current_user.id()).await? else {
        return Err(Error::unauthorized("Unauthorized"));
    };

    let values = UpdateNoteValues {
        title: form.title.as_deref().unwrap_or_default(),
        content: form.content.as_deref().unwrap_or_default(),
    };

    let note = storage
        .update_note(&user, &note_id, &values)
        .await
        .map_err(Error::internal)?;

    note.map_or_else(
        || Err(Error::not_found("Note not found")),
        |note| {
            Ok(Success::ok(SingleNoteResponse {
                note: NoteResponse::from_note(note),
            }))
        },
    )
}

/// Delete a note of the current user
///
/// The note lookup is scoped to the current user's own notes, the remaining
/// notes keep their order
///
/// Request:
/// ```sh
/// curl -v -XDELETE \
///     -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/notes/<uuid>
/// ```
///
/// Response:
/// ```json
/// { "message": "Note deleted successfully" }
/// ```
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser<S>,
    PathParameters(note_id): PathParameters<Uuid>,
) -> Result<Success<Message>, Error> {
    let Some(user) = fetch_user(&storage, current_user.id()).await? else {
        return Err(Error::unauthorized("Unauthorized"));
    };

    let note = storage
        .delete_note(&user, &note_id)
        .await
        .map_err(Error::internal)?;

    note.map_or_else(
        || Err(Error::not_found("Note not found")),
        |_| Ok(Success::ok(Message::new("Note deleted successfully"))),
    )
}

/// Fetch the owner record of the current user
///
/// A valid token for a missing record is handled by the caller, every
/// operation reports that case differently
async fn fetch_user<S: Storage>(storage: &S, user_id: Uuid) -> Result<Option<User>, Error> {
    storage
        .find_single_user_by_id(&user_id)
        .await
        .map_err(Error::internal)
}
