//! Landing page

use axum::response::Html;

/// Tiny landing page to show the service is up
pub async fn root() -> Html<&'static str> {
    Html("<h1>Backend Working</h1>")
}
