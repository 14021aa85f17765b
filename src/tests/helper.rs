use axum::Router;
use axum::body::Body;
use axum::body::Bytes;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use serde_json::Map;
use serde_json::Value;
use tower::Service;
use uuid::Uuid;

use crate::api::JwtKeys;
use crate::create_router;
use crate::storage::Memory;

/// Test helper version of the User struct
#[derive(Debug)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// Test helper version of the Note struct
#[derive(Debug, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

/// Error response
#[derive(Debug, PartialEq, Eq)]
pub struct Error {
    pub error: String,
    pub description: Option<String>,
}

/// Setup the Jotly app with a fresh memory storage
///
/// The JWT secret is fixed so tokens stay verifiable across helpers
pub fn setup_test_app() -> Router {
    create_router(Memory::new(), JwtKeys::new(b"verysecret"))
}

pub async fn root(app: &mut Router) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8_lossy(&body[..]).to_string();

    (status_code, body)
}

pub async fn maybe_register(
    app: &mut Router,
    email: &str,
    password: &str,
) -> (StatusCode, Option<String>, Option<String>) {
    let mut payload = Map::new();
    payload.insert("fName".to_string(), Value::String("Some".to_string()));
    payload.insert("lName".to_string(), Value::String("User".to_string()));
    payload.insert("email".to_string(), Value::String(email.to_string()));
    payload.insert("password".to_string(), Value::String(password.to_string()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/user/register")
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::CREATED {
            Some(get_access_token(&body))
        } else {
            None
        },
        if status_code == StatusCode::BAD_REQUEST {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn register(app: &mut Router, email: &str, password: &str) -> String {
    let (status_code, access_token, _) = maybe_register(app, email, password).await;

    assert_eq!(StatusCode::CREATED, status_code);

    access_token.unwrap()
}

pub async fn maybe_login(
    app: &mut Router,
    email: &str,
    password: &str,
) -> (StatusCode, Option<String>, Option<User>, Option<String>) {
    let mut payload = Map::new();
    payload.insert("email".to_string(), Value::String(email.to_string()));
    payload.insert("password".to_string(), Value::String(password.to_string()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/user/login")
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_access_token(&body))
        } else {
            None
        },
        if status_code == StatusCode::OK {
            Some(get_user(&body))
        } else {
            None
        },
        if status_code != StatusCode::OK {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn logout(app: &mut Router, access_token: &str) -> (StatusCode, Option<String>) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/user/logout")
        .header(AUTHORIZATION, access_token)
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_message(&body))
        } else {
            Some(get_error_message(&body))
        },
    )
}

pub async fn list_notes(
    app: &mut Router,
    access_token: &str,
) -> (StatusCode, Option<Vec<Note>>, Option<String>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/notes")
        .header(AUTHORIZATION, access_token)
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_notes(&body))
        } else {
            None
        },
        if status_code != StatusCode::OK {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn list_notes_unauthenticated(app: &mut Router) -> (StatusCode, Option<String>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/notes")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status_code, Some(get_error_message(&body)))
}

pub async fn maybe_create_note(
    app: &mut Router,
    access_token: &str,
    title: &str,
    content: &str,
) -> (StatusCode, Option<Note>, Option<String>) {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));
    payload.insert("content".to_string(), Value::String(content.to_string()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/notes")
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .header(AUTHORIZATION, access_token)
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::CREATED {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code != StatusCode::CREATED {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn maybe_create_note_with_raw_body(
    app: &mut Router,
    access_token: &str,
    body: &'static str,
    include_content_type: bool,
) -> (StatusCode, Option<Note>, Option<Error>) {
    let mut builder = Request::builder().method(Method::POST).uri("/notes");

    if include_content_type {
        builder = builder.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
    }

    let request = builder
        .header(AUTHORIZATION, access_token)
        .body(Body::from(body.as_bytes()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::CREATED {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code == StatusCode::BAD_REQUEST {
            Some(get_error(&body))
        } else {
            None
        },
    )
}

pub async fn maybe_update_note(
    app: &mut Router,
    access_token: &str,
    note_id: &Uuid,
    title: &str,
    content: &str,
) -> (StatusCode, Option<Note>, Option<String>) {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));
    payload.insert("content".to_string(), Value::String(content.to_string()));

    update_note_with_payload(app, access_token, &note_id.to_string(), &payload).await
}

pub async fn maybe_update_note_title_only(
    app: &mut Router,
    access_token: &str,
    note_id: &Uuid,
    title: &str,
) -> (StatusCode, Option<Note>, Option<String>) {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));

    update_note_with_payload(app, access_token, &note_id.to_string(), &payload).await
}

async fn update_note_with_payload(
    app: &mut Router,
    access_token: &str,
    note_id: &str,
    payload: &Map<String, Value>,
) -> (StatusCode, Option<Note>, Option<String>) {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(format!("/notes/{note_id}"))
        .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .header(AUTHORIZATION, access_token)
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_note(&body))
        } else {
            None
        },
        if status_code != StatusCode::OK {
            Some(get_error_message(&body))
        } else {
            None
        },
    )
}

pub async fn maybe_delete_note(
    app: &mut Router,
    access_token: &str,
    note_id: &Uuid,
) -> (StatusCode, Option<String>) {
    maybe_delete_note_with_str(app, access_token, &note_id.to_string()).await
}

pub async fn maybe_delete_note_with_str(
    app: &mut Router,
    access_token: &str,
    note_id: &str,
) -> (StatusCode, Option<String>) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/notes/{note_id}"))
        .header(AUTHORIZATION, access_token)
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status_code = response.status();

    let body = response.into_body().collect().await.unwrap().to_bytes();

    (
        status_code,
        if status_code == StatusCode::OK {
            Some(get_message(&body))
        } else {
            Some(get_error_message(&body))
        },
    )
}

fn get_user(body: &Bytes) -> User {
    let user = &serde_json::from_slice::<Value>(&body[..]).unwrap()["user"];

    User {
        id: user["id"].as_str().map(Uuid::parse_str).unwrap().unwrap(),
        email: user["email"].as_str().map(ToString::to_string).unwrap(),
    }
}

fn value_to_note(note: &Map<String, Value>) -> Note {
    Note {
        id: note["id"].as_str().map(Uuid::parse_str).unwrap().unwrap(),
        title: note["title"].as_str().map(ToString::to_string).unwrap(),
        content: note["content"].as_str().map(ToString::to_string).unwrap(),
    }
}

fn get_note(body: &Bytes) -> Note {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["note"]
        .as_object()
        .map(value_to_note)
        .unwrap()
}

fn get_notes(body: &Bytes) -> Vec<Note> {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note.as_object().unwrap())
        .map(value_to_note)
        .collect()
}

fn value_to_error(error: &Map<String, Value>) -> Error {
    Error {
        error: error["error"].as_str().map(ToString::to_string).unwrap(),
        description: error
            .get("description")
            .and_then(Value::as_str)
            .map(ToString::to_string),
    }
}

fn get_error(body: &Bytes) -> Error {
    serde_json::from_slice::<Value>(&body[..])
        .unwrap()
        .as_object()
        .map(value_to_error)
        .unwrap()
}

fn get_error_message(body: &Bytes) -> String {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["error"]
        .as_str()
        .map(ToString::to_string)
        .unwrap()
}

fn get_message(body: &Bytes) -> String {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["message"]
        .as_str()
        .map(ToString::to_string)
        .unwrap()
}

fn get_access_token(body: &Bytes) -> String {
    serde_json::from_slice::<Value>(&body[..]).unwrap()["token"]
        .as_str()
        .map(|access_token| format!("Bearer {access_token}"))
        .unwrap()
}
