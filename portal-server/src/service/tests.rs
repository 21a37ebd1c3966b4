//! Services integration tests

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::{self, TestRequest};

use crate::context::login::{AccountsAuthenticator, Credentials, DemoAuthenticator};
use crate::context::sessions::{DatabaseSessions, MemorySessions};
use crate::context::{Context, SessionCookie};
use crate::model::Model;

mod login;

const HOUR: Duration = Duration::from_secs(60 * 60);

/// Login form submission
fn login_form(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/login")
        .set_form(Credentials::new(email, password))
}

/// Cookie set by the response, removals included
fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

/// Redirect target
fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("No Location header")
        .to_str()
        .unwrap()
        .to_owned()
}

async fn body<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8_lossy(&body).into_owned()
}

/// Demo login with sessions kept in the database
async fn database_context() -> Context {
    let model = Model::test().await.unwrap();
    Context::new(
        model.clone(),
        Arc::new(DatabaseSessions::new(model, HOUR)),
        Arc::new(DemoAuthenticator::new(Duration::ZERO)),
        SessionCookie::default(),
    )
}

/// Login verified against registered accounts
async fn accounts_context() -> Context {
    let model = Model::test().await.unwrap();
    Context::new(
        model.clone(),
        Arc::new(MemorySessions::new(HOUR)),
        Arc::new(AccountsAuthenticator::new(model, Duration::ZERO)),
        SessionCookie::default(),
    )
}
