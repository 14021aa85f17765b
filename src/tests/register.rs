use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_register() {
    let mut app = helper::setup_test_app();

    // register a new user, a token comes back
    let (status_code, access_token, _) =
        helper::maybe_register(&mut app, "someone@example.com", "somepassword").await;
    assert_eq!(StatusCode::CREATED, status_code);
    assert!(access_token.is_some());
    let access_token = access_token.unwrap();

    // the fresh token is immediately usable
    let (status_code, notes, _) = helper::list_notes(&mut app, &access_token).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(notes.is_some());
    assert_eq!(Vec::<helper::Note>::new(), notes.unwrap());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let mut app = helper::setup_test_app();

    let email = "someone@example.com";

    helper::register(&mut app, email, "somepassword").await;

    // same email again is rejected
    let (status_code, access_token, error) =
        helper::maybe_register(&mut app, email, "someotherpassword").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(access_token.is_none());
    assert_eq!(Some("Email is already registered.".to_string()), error);

    // the original record is untouched, its password still logs in
    let (status_code, access_token, _, _) =
        helper::maybe_login(&mut app, email, "somepassword").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(access_token.is_some());

    // and the rejected password does not
    let (status_code, _, _, error) =
        helper::maybe_login(&mut app, email, "someotherpassword").await;
    assert_eq!(StatusCode::UNAUTHORIZED, status_code);
    assert_eq!(Some("Invalid credentials".to_string()), error);
}
