//! Notifications carried across a redirect
//!
//! Queued notifications are serialized to JSON and stored base64 encoded in the `flash` cookie.
//! The next rendered page shows them and removes the cookie.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use base64::prelude::*;
use color_eyre::Result;
use tracing::debug;

use crate::pages::Notification;

pub const FLASH_COOKIE: &str = "flash";

/// Cookie queueing notifications for the next page
pub fn cookie(notifications: &[Notification]) -> Result<Cookie<'static>> {
    let json = serde_json::to_vec(notifications)?;
    let cookie = Cookie::build(FLASH_COOKIE, BASE64_URL_SAFE_NO_PAD.encode(json))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(cookie)
}

/// Cookie dropping queued notifications
pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Were any notifications queued for this request
pub fn pending(req: &HttpRequest) -> bool {
    req.cookie(FLASH_COOKIE).is_some()
}

/// Notifications queued for this request
///
/// Malformed cookie is treated as no notifications.
pub fn read(req: &HttpRequest) -> Vec<Notification> {
    let Some(cookie) = req.cookie(FLASH_COOKIE) else {
        return vec![];
    };

    decode(cookie.value()).unwrap_or_else(|err| {
        debug!(%err, "Ignoring malformed flash cookie");
        vec![]
    })
}

fn decode(value: &str) -> Result<Vec<Notification>> {
    let json = BASE64_URL_SAFE_NO_PAD.decode(value)?;
    Ok(serde_json::from_slice(&json)?)
}
