//! User API management

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::password::hash;
use crate::password::verify;
use crate::storage::CreateUserValues;
use crate::storage::Storage;
use crate::users::User;

use super::CurrentUser;
use super::Error;
use super::Form;
use super::JwtKeys;
use super::Message;
use super::Success;
use super::current_user::generate_token;
use super::notes::NoteResponse;

/// The user response information
///
/// A subset of all the information, ready to be serialized for the outside
/// world -- the hashed password stays inside
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// The user ID
    pub id: Uuid,

    /// First name of the user
    pub f_name: String,

    /// Last name of the user
    pub l_name: String,

    /// Email address of the user
    pub email: String,

    /// The user's notes, in insertion order
    pub notes: Vec<NoteResponse>,
}

impl UserResponse {
    /// Create a user response from a [`User`](User)
    fn from_user(user: User) -> Self {
        Self {
            id: user.id,
            f_name: user.first_name,
            l_name: user.last_name,
            email: user.email,
            notes: NoteResponse::from_note_multiple(user.notes),
        }
    }
}

/// The token response after a registration
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// The signed bearer token
    token: String,
}

/// The login response, a token plus the user's public fields
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The signed bearer token
    token: String,

    /// The user that logged in
    user: UserResponse,
}

/// Register form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// First name of the new user
    f_name: String,

    /// Last name of the new user
    l_name: String,

    /// Email address, must not be registered yet
    email: String,

    /// Password of the new user, only the hash is stored
    password: String,
}

/// Register a new user
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "fName": "Some", "lName": "User", "email": "someone@example.com", "password": "verysecret" }' \
///     http://localhost:6000/user/register
/// ```
///
/// Response:
/// ```json
/// { "token": "some token" }
/// ```
pub async fn register<S: Storage>(
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(storage): Extension<S>,
    Form(form): Form<RegisterForm>,
) -> Result<Success<TokenResponse>, Error> {
    let existing_user = storage
        .find_single_user_by_email(&form.email)
        .await
        .map_err(Error::internal)?;

    if existing_user.is_some() {
        return Err(Error::bad_request("Email is already registered."));
    }

    let hashed_password = hash(&form.password).map_err(Error::internal)?;

    let values = CreateUserValues {
        first_name: &form.f_name,
        last_name: &form.l_name,
        email: &form.email,
        hashed_password: &hashed_password,
    };

    let user = storage
        .create_user(&values)
        .await
        .map_err(Error::internal)?;

    let token = generate_token(&jwt_keys, &user)?;

    Ok(Success::created(TokenResponse { token }))
}

/// Login form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    /// Email address of the user
    email: String,

    /// Password of the user
    password: String,
}

/// Get a token for a user "session"
///
/// The token can then be used to access the notes routes by using it in the
/// `Authorization` header
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "email": "someone@example.com", "password": "verysecret" }' \
///     http://localhost:6000/user/login
/// ```
///
/// Response:
/// ```json
/// { "token": "some token", "user": { "id": "<uuid>", "email": "someone@example.com" } }
/// ```
pub async fn login<S: Storage>(
    Extension(jwt_keys): Extension<JwtKeys>,
    Extension(storage): Extension<S>,
    Form(form): Form<LoginForm>,
) -> Result<Success<LoginResponse>, Error> {
    if form.email.is_empty() || form.password.is_empty() {
        return Err(Error::bad_request("Missing credentials"));
    }

    let user = storage
        .find_single_user_by_email(&form.email)
        .await
        .map_err(Error::internal)?;

    let Some(user) = user else {
        return Err(Error::unauthorized("Invalid credentials"));
    };

    let is_valid = verify(&user.hashed_password, &form.password).map_err(Error::internal)?;

    if !is_valid {
        return Err(Error::unauthorized("Invalid credentials"));
    }

    let token = generate_token(&jwt_keys, &user)?;

    Ok(Success::ok(LoginResponse {
        token,
        user: UserResponse::from_user(user),
    }))
}

/// Log the current user out by blacklisting their token
///
/// The token itself stays valid until its natural expiry, the blacklist is
/// what keeps it out
///
/// Request:
/// ```sh
/// curl -v -XPOST \
///     -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/user/logout
/// ```
///
/// Response:
/// ```json
/// { "message": "Logged out successfully" }
/// ```
pub async fn logout<S: Storage>(
    Extension(storage): Extension<S>,
    current_user: CurrentUser<S>,
) -> Result<Success<Message>, Error> {
    storage
        .revoke_token(current_user.token())
        .await
        .map_err(Error::internal)?;

    Ok(Success::ok(Message::new("Logged out successfully")))
}
