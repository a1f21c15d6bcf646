//! EmailJsRelay - delivers contact messages through the EmailJS REST API.

use async_trait::async_trait;
use folio_core::config::ContactConfig;
use folio_core::contact::{EmailParams, MailRelay};
use folio_core::error::{FolioError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailParams,
}

/// Posts contact messages to an EmailJS-compatible endpoint.
///
/// A submission counts as delivered only on HTTP 200.
#[derive(Clone)]
pub struct EmailJsRelay {
    client: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsRelay {
    pub fn new(
        endpoint: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            endpoint: endpoint.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Builds a relay from the `[contact]` config section.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Config` when the credentials are not filled in.
    pub fn from_config(config: &ContactConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(FolioError::config(
                "contact relay is not configured: set service_id, template_id and public_key under [contact]",
            ));
        }
        Ok(Self::new(
            config.endpoint.clone(),
            config.service_id.clone(),
            config.template_id.clone(),
            config.public_key.clone(),
        ))
    }
}

#[async_trait]
impl MailRelay for EmailJsRelay {
    async fn send(&self, params: &EmailParams) -> Result<()> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: params,
        };
        debug!(endpoint = %self.endpoint, "sending contact message");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| FolioError::relay(format!("request failed: {err}")))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }
        let body_text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        warn!(%status, body = %body_text, "relay rejected contact message");
        Err(FolioError::relay(format!("HTTP {}: {}", status, body_text.trim())))
    }
}
