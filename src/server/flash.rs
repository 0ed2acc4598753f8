//! One-shot flash messages carried in an encrypted cookie.
//!
//! Handlers that redirect push a message; the next list render takes and clears them.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

const FLASH_COOKIE: &str = "catalog_flash";

/// Rendered as the Bootstrap alert class (`alert-success`, `alert-danger`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Danger,
            message: message.into(),
        }
    }
}

fn read(jar: &PrivateCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok())
        .unwrap_or_default()
}

/// Appends `flash` to any messages not yet shown.
pub fn push(jar: PrivateCookieJar, flash: Flash, insecure: bool) -> PrivateCookieJar {
    let mut pending = read(&jar);
    pending.push(flash);
    match serde_json::to_string(&pending) {
        Ok(value) => jar.add(build_cookie(value, insecure)),
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode flash messages");
            jar
        }
    }
}

/// Returns pending messages and clears the cookie.
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Vec<Flash>) {
    let pending = read(&jar);
    if pending.is_empty() {
        return (jar, pending);
    }
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, pending)
}

fn build_cookie(value: String, insecure: bool) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(!insecure)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .build()
}
