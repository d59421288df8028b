//! Per-request caller identity
//!
//! Every tool call is attributed to a caller name resolved from the request
//! itself. The identity is built per request and moved into the call; it is
//! never stored in shared state.
//!
//! Resolution precedence, first usable name wins:
//! 1. explicit override (`client` query parameter or `X-Client-Name` header)
//! 2. product token parsed from the User-Agent
//! 3. network origin (loopback becomes "local agent")
//! 4. the sanitized User-Agent string itself
//! 5. the literal "unknown"
//!
//! A candidate is usable when it is non-empty and not itself "unknown".

use std::net::IpAddr;

/// Caller names longer than this are truncated
const MAX_NAME_LEN: usize = 64;

/// Who is making this tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Resolved display name
    pub name: String,
    /// Transport the call arrived over
    pub transport: &'static str,
    /// Raw User-Agent header, when present
    pub user_agent: Option<String>,
    /// Peer address, when known
    pub origin: Option<IpAddr>,
}

impl CallerIdentity {
    /// Resolve an identity from the request surface
    pub fn resolve(
        explicit: Option<&str>,
        user_agent: Option<&str>,
        origin: Option<IpAddr>,
    ) -> Self {
        let name = usable(explicit.map(str::to_owned))
            .or_else(|| usable(user_agent.and_then(product_token)))
            .or_else(|| usable(origin_name(origin)))
            .or_else(|| usable(user_agent.map(sanitize)))
            .unwrap_or_else(|| "unknown".to_owned());

        Self {
            name,
            transport: "http",
            user_agent: user_agent.map(str::to_owned),
            origin,
        }
    }
}

/// Reject empty and literal-"unknown" candidates
fn usable(candidate: Option<String>) -> Option<String> {
    let candidate = sanitize(candidate?.as_str());
    if candidate.is_empty() || candidate.eq_ignore_ascii_case("unknown") {
        None
    } else {
        Some(candidate)
    }
}

/// Leading product token of a User-Agent, e.g. `curl/8.6.0` -> `curl`
fn product_token(user_agent: &str) -> Option<String> {
    let token = user_agent
        .split_whitespace()
        .next()?
        .split('/')
        .next()?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

/// Name derived from the peer address
fn origin_name(origin: Option<IpAddr>) -> Option<String> {
    let addr = origin?;
    if addr.is_loopback() {
        Some("local agent".to_owned())
    } else {
        Some(addr.to_string())
    }
}

/// Strip control characters and clamp length
fn sanitize(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    cleaned.chars().take(MAX_NAME_LEN).collect()
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
