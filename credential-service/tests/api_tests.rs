mod common;

use auth::TokenVerification;
use common::test_authenticator;
use common::TestApp;
use credential_service::repositories::InMemoryCredentialRepository;
use reqwest::StatusCode;

async fn expect_error(response: reqwest::Response, message: &str) {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], message);
}

#[tokio::test]
async fn test_register_malformed_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/api/register", &[("email", "malformed"), ("passwd", "request")])
        .send()
        .await
        .expect("Failed to execute request");

    expect_error(response, "Malformed request; expecting email and password").await;
}

#[tokio::test]
async fn test_register_non_form_body_is_malformed() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .post(format!("{}/api/register", app.address))
        .json(&serde_json::json!({
            "email": "valid@email.com",
            "password": "validPassword123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_error(response, "Malformed request; expecting email and password").await;
}

#[tokio::test]
async fn test_register_email_too_long() {
    let app = TestApp::spawn().await;
    let email = "a".repeat(256);

    let response = app
        .post_form("/api/register", &[("email", email.as_str()), ("password", "email too long")])
        .send()
        .await
        .expect("Failed to execute request");

    expect_error(response, "Email can't be over 255 characters.").await;
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    for email in ["bad email1", "badEmail@2", ""] {
        let response = app
            .post_form("/api/register", &[("email", email), ("password", "something")])
            .send()
            .await
            .expect("Failed to execute request");

        expect_error(response, "Email not valid.").await;
    }
}

#[tokio::test]
async fn test_register_password_policy() {
    let app = TestApp::spawn().await;
    let too_long = "a".repeat(256);

    for password in ["tooshrt", too_long.as_str()] {
        let response = app
            .post_form(
                "/api/register",
                &[("email", "valid@email.com"), ("password", password)],
            )
            .send()
            .await
            .expect("Failed to execute request");

        expect_error(response, "Password must be between 8-255 characters.").await;
    }

    let response = app
        .post_form(
            "/api/register",
            &[("email", "valid@email.com"), ("password", "notalphanumeric!@#$")],
        )
        .send()
        .await
        .expect("Failed to execute request");

    expect_error(
        response,
        "Only alphanumeric characters are allowed in a password.",
    )
    .await;

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app
        .post_form(
            "/api/register",
            &[("email", "test@gmail.com"), ("password", "testpassword")],
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .post_form(
            "/api/register",
            &[("email", "test@gmail.com"), ("password", "testpassword")],
        )
        .send()
        .await
        .expect("Failed to execute request");

    expect_error(second, "Email already in use, please use another one").await;
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;
    let email = "new1Emai2lNo24bo5dyShouldHave@gmail.com";

    let response = app
        .post_form(
            "/api/register",
            &[("email", email), ("password", "validPassword123")],
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["success"],
        "Account has been created! Check your email to validate your account."
    );
    let token = body["auth_token"].as_str().expect("auth_token missing");
    assert!(!token.is_empty());

    let stored = app.stored_credential(email).await;
    match app.authenticator.verify_token(token, &stored.id.to_string()) {
        TokenVerification::Valid(claims) => assert_eq!(claims.email, email),
        other => panic!("expected valid token, got {:?}", other),
    }
}

#[tokio::test]
async fn test_authenticate() {
    let app = TestApp::spawn().await;
    let valid_email = "validEmail@gmail.com";
    let valid_password = "validpassword123";

    let credential = app.credential(valid_email, valid_password);
    let subject = credential.id.to_string();
    app.insert(credential).await;

    // correct email and password
    let response = app
        .post_form(
            "/api/auth",
            &[("email", valid_email), ("password", valid_password)],
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], valid_email);
    let token = body["auth_token"].as_str().expect("auth_token missing");
    assert!(app.authenticator.verify_token(token, &subject).is_valid());

    // wrong password, wrong email, both wrong
    for (email, password) in [
        (valid_email, "invalidPassword"),
        ("invalid@email.com", valid_password),
        ("invalid@email.com", "invalidPassword"),
    ] {
        let response = app
            .post_form("/api/auth", &[("email", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request");

        expect_error(response, "Incorrect email or password").await;
    }
}

#[tokio::test]
async fn test_authenticate_malformed_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/api/auth", &[("email", "validEmail@gmail.com")])
        .send()
        .await
        .expect("Failed to execute request");

    expect_error(response, "Malformed request; expecting email and password").await;
}

#[tokio::test]
async fn test_authenticate_duplicate_email_looks_like_wrong_credentials() {
    let hasher = test_authenticator();
    let make = || {
        credential_service::credential::models::Credential::new(
            "twice@example.com".to_string(),
            hasher.hash_password("validpassword123").unwrap(),
        )
    };
    let repository = InMemoryCredentialRepository::with_credentials(vec![make(), make()]);
    let app = TestApp::spawn_with(repository).await;

    let response = app
        .post_form(
            "/api/auth",
            &[("email", "twice@example.com"), ("password", "validpassword123")],
        )
        .send()
        .await
        .expect("Failed to execute request");

    expect_error(response, "Incorrect email or password").await;
}

#[tokio::test]
async fn test_register_then_authenticate() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/api/register",
            &[("email", "roundtrip@example.com"), ("password", "validPassword123")],
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_form(
            "/api/auth",
            &[("email", "roundtrip@example.com"), ("password", "validPassword123")],
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/api/register",
            &[("email", "bearer@example.com"), ("password", "validPassword123")],
        )
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["auth_token"].as_str().unwrap().to_string();

    let response = app
        .get("/api/protected")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "bearer@example.com");

    let response = app
        .get("/api/protected")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get("/api/protected")
        .bearer_auth("invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
