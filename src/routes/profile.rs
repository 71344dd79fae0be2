// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile provisioning route, called by the frontend once a user signs in.

use crate::error::Result;
use crate::middleware::session::SessionUser;
use crate::services::{ProvisionRequest, ProvisionStatus};
use crate::AppState;
use axum::{
    body::Bytes, extract::State, http::StatusCode, routing::post, Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/create-profile", post(create_profile))
}

/// Provisioning success body.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MessageResponse {
    pub message: String,
}

/// Find-or-create the caller's profile.
///
/// The body is optional; an unreadable body is treated as empty so the
/// session identity can still be used.
async fn create_profile(
    State(state): State<Arc<AppState>>,
    session: Option<Extension<SessionUser>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let request = parse_body(&body);
    let session = session.as_ref().map(|Extension(user)| user);

    let status = state.provisioner.provision(&request, session).await?;

    let response = match status {
        ProvisionStatus::Created => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Profile created successfully.".to_string(),
            }),
        ),
        ProvisionStatus::AlreadyExists => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Profile already exists.".to_string(),
            }),
        ),
    };

    Ok(response)
}

fn parse_body(body: &[u8]) -> ProvisionRequest {
    if body.is_empty() {
        return ProvisionRequest::default();
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to parse provisioning body, ignoring it");
        ProvisionRequest::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body_accepts_partial_fields() {
        let request = parse_body(br#"{"userId": "user_1"}"#);
        assert_eq!(request.user_id.as_deref(), Some("user_1"));
        assert_eq!(request.email, None);
    }

    #[test]
    fn unreadable_body_is_empty() {
        for body in [&b""[..], &b"not json"[..], &b"{\"userId\": 42}"[..], &b"\xff\xfe"[..]] {
            let request = parse_body(body);
            assert!(request.user_id.is_none());
            assert!(request.email.is_none());
        }
    }

    #[test]
    fn null_fields_are_absent() {
        let request = parse_body(br#"{"userId": null, "email": null}"#);
        assert!(request.user_id.is_none());
    }
}
