//! Preflight Probe Port
//!
//! Issues a browser-style CORS preflight against a live URL.

/// What the server answered to a preflight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResponse {
    pub status: u16,
    pub allow_origin: Option<String>,
}

pub trait PreflightProbe: Send + Sync {
    /// Send `OPTIONS url` with `Origin: origin` and `Access-Control-Request-Method: GET`.
    ///
    /// Transport failures are returned as `Err` with a readable message.
    fn preflight(&self, url: &str, origin: &str) -> Result<PreflightResponse, String>;
}

/// A preflight passes when the allow-origin header echoes the origin or is `*`.
pub fn origin_allowed(origin: &str, allow_origin: Option<&str>) -> bool {
    match allow_origin.map(str::trim) {
        Some("*") => true,
        Some(value) => value == origin,
        None => false,
    }
}
