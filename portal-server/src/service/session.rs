//! Session cookie and the route guard

use std::future::Future;
use std::pin::Pin;

use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use color_eyre::Result;
use thiserror::Error;
use tracing::{debug, error};

use crate::context::{Context, SessionCookie};
use crate::model::auth::{Session, SessionToken};

/// Where signed out visitors are sent
pub const LOGIN_PATH: &str = "/login";

/// Cookie holding the session token
pub fn cookie(settings: &SessionCookie, session: &Session) -> Cookie<'static> {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);

    Cookie::build(settings.name.clone(), session.token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .max_age(time::Duration::seconds(max_age))
        .finish()
}

/// Cookie emptying the session slot
pub fn removal(settings: &SessionCookie) -> Cookie<'static> {
    let mut cookie = Cookie::build(settings.name.clone(), "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .finish();
    cookie.make_removal();
    cookie
}

/// Token stored in the session slot, if any
pub fn token(req: &HttpRequest, settings: &SessionCookie) -> Option<SessionToken> {
    req.cookie(&settings.name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
        .map(SessionToken::new)
}

/// Session the request is signed in with
pub async fn current(req: &HttpRequest, context: &Context) -> Result<Option<Session>> {
    match token(req, context.cookie()) {
        Some(token) => context.sessions().load(&token).await,
        None => Ok(None),
    }
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Not signed in")]
    SignedOut {
        /// Removal of a cookie that no longer refers to a session
        stale_cookie: Option<Cookie<'static>>,
    },
    #[error("Cannot verify session")]
    Unavailable,
}

impl ResponseError for GuardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SignedOut { .. } => StatusCode::SEE_OTHER,
            Self::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::SignedOut { stale_cookie } => {
                let mut response = HttpResponse::SeeOther();
                response.insert_header((header::LOCATION, LOGIN_PATH));
                if let Some(cookie) = stale_cookie {
                    response.cookie(cookie.clone());
                }
                response.finish()
            }
            Self::Unavailable => HttpResponse::InternalServerError().finish(),
        }
    }
}

/// Route guard
///
/// Handlers taking it are reachable only with a live session, everyone else is redirected to
/// the login page.
#[derive(Debug, Clone)]
pub struct SignedIn(pub Session);

impl FromRequest for SignedIn {
    type Error = GuardError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Some(context) = req.app_data::<Data<Context>>() else {
                error!("Application context not configured");
                return Err(GuardError::Unavailable);
            };

            let Some(token) = token(&req, context.cookie()) else {
                return Err(GuardError::SignedOut { stale_cookie: None });
            };

            match context.sessions().load(&token).await {
                Ok(Some(session)) => Ok(SignedIn(session)),
                Ok(None) => {
                    debug!("Stale session cookie");
                    Err(GuardError::SignedOut {
                        stale_cookie: Some(removal(context.cookie())),
                    })
                }
                Err(err) => {
                    error!(?err, "Cannot load session");
                    Err(GuardError::Unavailable)
                }
            }
        })
    }
}
