//! Cloudflare HTTP request plumbing.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CF_API_BASE, CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// Unwrap the Cloudflare response envelope, mapping API errors.
    fn unwrap_response<T>(
        &self,
        response_text: &str,
        context: ErrorContext,
    ) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let cf_response: CloudflareResponse<T> =
            serde_json::from_str(response_text).map_err(|e| {
                log::error!("Failed to decode Cloudflare response: {e}");
                log::debug!("Raw response: {response_text}");
                self.parse_error(e)
            })?;

        if !cf_response.success {
            let (code, message) = cf_response
                .errors
                .and_then(|errors| {
                    errors
                        .first()
                        .map(|e| (e.code.to_string(), e.message.clone()))
                })
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            return Err(self.map_error(RawApiError::with_code(code, message), context));
        }

        cf_response
            .result
            .ok_or_else(|| self.parse_error("missing result field in response"))
    }

    /// Perform a GET request.
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        log::debug!("Response status: {}", response.status());

        let response_text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.unwrap_response(&response_text, context)
    }

    /// Perform a POST request with a JSON body.
    pub(crate) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        log::debug!("Response status: {}", response.status());

        let response_text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.unwrap_response(&response_text, context)
    }

    /// Perform a PATCH request with a JSON body.
    pub(crate) async fn patch<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{CF_API_BASE}{path}");
        log::debug!("PATCH {url}");

        let response = self
            .client
            .patch(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        log::debug!("Response status: {}", response.status());

        let response_text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.unwrap_response(&response_text, context)
    }
}
