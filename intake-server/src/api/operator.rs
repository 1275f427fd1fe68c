//! Operator Extractor
//!
//! Admin routes identify the acting operator through `X-User-Id` and
//! `X-User-Name` headers set by the console. Authentication is handled in
//! front of this service.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::models::Actor;

use crate::AppError;
use crate::core::ServerState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

const DEFAULT_OPERATOR_ID: &str = "admin";
const DEFAULT_OPERATOR_NAME: &str = "Admin";

/// Operator performing an admin action
#[derive(Debug, Clone)]
pub struct Operator(pub Actor);

impl Operator {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

impl FromRequestParts<ServerState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let id = header(USER_ID_HEADER).unwrap_or_else(|| DEFAULT_OPERATOR_ID.to_string());
        let name = header(USER_NAME_HEADER).unwrap_or_else(|| DEFAULT_OPERATOR_NAME.to_string());
        Ok(Self(Actor::new(id, name)))
    }
}
