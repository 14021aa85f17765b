//! All API endpoint setup

use axum::Router;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;

pub use current_user::CurrentUser;
pub use current_user::JwtKeys;
pub use request::Form;
pub use request::PathParameters;
pub use response::Error;
pub use response::Message;
pub use response::Success;

mod current_user;
mod notes;
mod request;
mod response;
mod users;

use crate::storage::Storage;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let users = Router::new()
        .route("/register", post(users::register::<S>))
        .route("/login", post(users::login::<S>))
        .route("/logout", post(users::logout::<S>));

    let notes = Router::new()
        .route("/", get(notes::list::<S>))
        .route("/", post(notes::create::<S>))
        .route("/{note}", put(notes::update::<S>))
        .route("/{note}", delete(notes::delete::<S>));

    Router::new().nest("/user", users).nest("/notes", notes)
}
