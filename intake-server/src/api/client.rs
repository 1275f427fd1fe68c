//! Client Info Extractor
//!
//! Collects what the gate needs to know about the submitting browser.
//!
//! With `trust_proxy_headers` on, the client IP is the first
//! `X-Forwarded-For` entry. That is only sound behind a reverse proxy that
//! overwrites the header; a client reaching the server directly could send a
//! new address on every request and dodge both the rate limit and the
//! blacklist. Turn it off for direct exposure and the TCP peer is used.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use http::header::{REFERER, USER_AGENT};

use crate::AppError;
use crate::core::ServerState;

pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Used when neither a proxy header nor a peer address is available
pub const UNKNOWN_IP: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl FromRequestParts<ServerState> for ClientInfo {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        Ok(client_info(parts, state.config.trust_proxy_headers))
    }
}

fn header_value(parts: &Parts, name: impl http::header::AsHeaderName) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn client_info(parts: &Parts, trust_proxy_headers: bool) -> ClientInfo {
    ClientInfo {
        ip: extract_ip(parts, trust_proxy_headers),
        user_agent: header_value(parts, USER_AGENT),
        referrer: header_value(parts, REFERER),
    }
}

/// First `X-Forwarded-For` entry when proxy headers are trusted, else the
/// socket peer
pub fn extract_ip(parts: &Parts, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers
        && let Some(forwarded) = header_value(parts, FORWARDED_FOR_HEADER)
        && let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty())
    {
        return first.to_string();
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}
