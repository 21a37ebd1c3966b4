//! Login, route guard and logout tests

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use assert_json_diff::assert_json_eq;
use serde_json::{Value, json};

use crate::context::login::DemoAuthenticator;
use crate::context::sessions::MemorySessions;
use crate::context::{Context, SessionCookie};
use crate::model::Model;
use crate::service;
use crate::service::flash::FLASH_COOKIE;
use crate::service::session::LOGIN_PATH;
use crate::service::tests::{body, database_context, location, login_form, response_cookie};

#[actix_web::test]
async fn login_opens_dashboard() {
    let context = Context::test().await.unwrap();
    let app = test::init_service(App::new().configure(service::configure(context))).await;

    let resp = test::call_service(&app, login_form("jane@svit.ac.in", "x").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");

    let session = response_cookie(&resp, "user").unwrap();
    assert!(!session.value().is_empty());
    assert_eq!(session.http_only(), Some(true));
    assert_eq!(session.path(), Some("/"));
    let flash = response_cookie(&resp, FLASH_COOKIE).unwrap();

    // Success notification is shown once
    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/dashboard")
            .cookie(session.clone())
            .cookie(flash)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(response_cookie(&resp, FLASH_COOKIE).unwrap().value(), "");

    let html = body(resp).await;
    assert!(html.contains("Welcome back, jane!"));
    assert!(html.contains("Login Successful!"));
    assert!(html.contains("Welcome to SVIT Student Portal"));

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/dashboard")
            .cookie(session)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body(resp).await;
    assert!(html.contains("Welcome back, jane!"));
    assert!(!html.contains("Login Successful!"));
}

#[actix_web::test]
async fn incomplete_login_rejected() {
    let context = Context::test().await.unwrap();
    let app = test::init_service(App::new().configure(service::configure(context))).await;

    for (email, password) in [("a@b.com", ""), ("", "x"), ("", "")] {
        let resp = test::call_service(&app, login_form(email, password).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{email:?}");
        assert!(response_cookie(&resp, "user").is_none());

        let html = body(resp).await;
        assert!(html.contains("Login Failed"));
        assert!(html.contains("Please fill in all fields"));
    }

    let resp = test::call_service(&app, login_form("a@b.com", "").to_request()).await;
    let html = body(resp).await;
    assert!(html.contains(r#"value="a@b.com""#));
}

#[actix_web::test]
async fn whitespace_counts_as_filled_in() {
    let context = Context::test().await.unwrap();
    let app = test::init_service(App::new().configure(service::configure(context))).await;

    let resp = test::call_service(&app, login_form("   ", "x").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");
    let session = response_cookie(&resp, "user").unwrap();

    let resp: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/api/session")
            .cookie(session)
            .to_request(),
    )
    .await;
    assert_json_eq!(resp, json!({ "present": true, "identity": "   " }));
}

#[actix_web::test]
async fn every_outcome_waits_for_delay() {
    let model = Model::test().await.unwrap();
    let context = Context::new(
        model,
        Arc::new(MemorySessions::new(Duration::from_secs(60))),
        Arc::new(DemoAuthenticator::new(Duration::from_millis(1500))),
        SessionCookie::default(),
    );
    let app = test::init_service(App::new().configure(service::configure(context))).await;
    tokio::time::pause();

    for (email, password, status) in [
        ("", "x", StatusCode::UNPROCESSABLE_ENTITY),
        ("a@b.com", "", StatusCode::UNPROCESSABLE_ENTITY),
        ("a@b.com", "x", StatusCode::SEE_OTHER),
    ] {
        let start = tokio::time::Instant::now();
        let resp = test::call_service(&app, login_form(email, password).to_request()).await;

        assert_eq!(resp.status(), status, "{email:?} / {password:?}");
        assert!(
            start.elapsed() >= Duration::from_millis(1500),
            "{email:?} / {password:?}"
        );
    }
}

#[actix_web::test]
async fn dashboard_requires_session() {
    let context = Context::test().await.unwrap();
    let app = test::init_service(App::new().configure(service::configure(context))).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/dashboard").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), LOGIN_PATH);
    assert!(response_cookie(&resp, "user").is_none());
    assert_eq!(body(resp).await, "");

    // Unknown token is dropped from the browser
    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/dashboard")
            .cookie(Cookie::new("user", "forged"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), LOGIN_PATH);
    assert_eq!(response_cookie(&resp, "user").unwrap().value(), "");
    assert_eq!(body(resp).await, "");
}

#[actix_web::test]
async fn logout_ends_session() {
    for context in [Context::test().await.unwrap(), database_context().await] {
        let app = test::init_service(App::new().configure(service::configure(context))).await;

        let resp = test::call_service(&app, login_form("a@b.com", "x").to_request()).await;
        let session = response_cookie(&resp, "user").unwrap();

        let resp = test::call_service(
            &app,
            TestRequest::post()
                .uri("/logout")
                .cookie(session.clone())
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/");
        assert_eq!(response_cookie(&resp, "user").unwrap().value(), "");
        let flash = response_cookie(&resp, FLASH_COOKIE).unwrap();

        let resp = test::call_service(
            &app,
            TestRequest::get().uri("/").cookie(flash).to_request(),
        )
        .await;
        let html = body(resp).await;
        assert!(html.contains("Logged Out"));
        assert!(html.contains("You have been successfully logged out"));

        // Reusing the old cookie doesn't bring the session back
        let resp = test::call_service(
            &app,
            TestRequest::get()
                .uri("/dashboard")
                .cookie(session)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), LOGIN_PATH);
    }
}

#[actix_web::test]
async fn logout_without_session() {
    let context = Context::test().await.unwrap();
    let app = test::init_service(App::new().configure(service::configure(context))).await;

    let resp = test::call_service(&app, TestRequest::post().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn session_api() {
    let context = database_context().await;
    let app = test::init_service(App::new().configure(service::configure(context))).await;

    let resp: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/session").to_request(),
    )
    .await;
    assert_json_eq!(resp, json!({ "present": false, "identity": "" }));

    let resp = test::call_service(&app, login_form("a@b.com", "x").to_request()).await;
    let session = response_cookie(&resp, "user").unwrap();

    let resp: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/api/session")
            .cookie(session)
            .to_request(),
    )
    .await;
    assert_json_eq!(resp, json!({ "present": true, "identity": "a@b.com" }));

    // Garbage in the slot reads as signed out, not as an error
    let resp: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/api/session")
            .cookie(Cookie::new("user", "v4.public.garbage"))
            .to_request(),
    )
    .await;
    assert_json_eq!(resp, json!({ "present": false, "identity": "" }));
}
