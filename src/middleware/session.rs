// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity-provider session extraction.
//!
//! The identity provider signs session tokens (HS256) with a key shared with
//! this service. A verified token becomes a [`SessionUser`] request extension.
//! A missing or invalid token leaves the request anonymous; handlers decide
//! whether that matters.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie carrying the identity provider's session token.
pub const SESSION_COOKIE: &str = "__session";

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity-provider user ID)
    pub sub: String,
    /// Verified email addresses, primary first
    #[serde(default)]
    pub emails: Vec<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user taken from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub emails: Vec<String>,
}

impl SessionUser {
    /// First verified email, if any.
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}

/// Middleware that attaches the session user when a valid token is present.
pub async fn resolve_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    // Try cookie first, then header
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => Some(cookie.value().to_string()),
        None => request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string),
    };

    if let Some(token) = token {
        match verify_session_token(&token, &state.config.session_signing_key) {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid session token");
            }
        }
    }

    next.run(request).await
}

/// Decode and verify a session token.
pub fn verify_session_token(
    token: &str,
    signing_key: &[u8],
) -> jsonwebtoken::errors::Result<SessionUser> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation)?;

    Ok(SessionUser {
        id: token_data.claims.sub,
        emails: token_data.claims.emails,
    })
}

/// Create a session token. Mirrors what the identity provider issues; used by
/// tests and local tooling.
pub fn create_session_token(
    user_id: &str,
    emails: &[&str],
    signing_key: &[u8],
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        emails: emails.iter().map(|e| e.to_string()).collect(),
        iat: now,
        exp: now + 60 * 60, // 1 hour
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
