//! HTTP Preflight Probe
//!
//! Sends real `OPTIONS` requests the way a browser does before a
//! cross-origin `GET`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN};
use reqwest::Method;

use crate::domain::ports::{PreflightProbe, PreflightResponse};
use crate::error::{BucketshipError, BucketshipResult};

pub const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpPreflightProbe {
    client: Client,
}

impl HttpPreflightProbe {
    pub fn new() -> BucketshipResult<Self> {
        Self::with_timeout(PREFLIGHT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> BucketshipResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| BucketshipError::Provider {
                operation: "http_client".to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl PreflightProbe for HttpPreflightProbe {
    fn preflight(&self, url: &str, origin: &str) -> Result<PreflightResponse, String> {
        let response = self
            .client
            .request(Method::OPTIONS, url)
            .header(ORIGIN, origin)
            .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .send()
            .map_err(|err| err.to_string())?;

        let allow_origin = response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        tracing::debug!(url, origin, status = %response.status(), "preflight");

        Ok(PreflightResponse {
            status: response.status().as_u16(),
            allow_origin,
        })
    }
}
