//! [`ServiceClient`]: HTTP client for a running lustred.
//!
//! `/predict` answers `200 OK` for every outcome, so [`ServiceClient::predict`]
//! returns the response text as-is. Callers that need to tell a prediction
//! from an error can use [`ServiceClient::predict_price`], which parses the
//! formatted price back out.

use reqwest::Client;

use crate::types::PREDICTION_PREFIX;
use crate::{HealthStatus, LustreError, PredictionForm, Result};

/// A client for a remote lustred server.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    ///
    /// No connection is made until the first request.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| LustreError::Http(format!("failed to build HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `/health`.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| from_reqwest(&url, e))?
            .error_for_status()
            .map_err(|e| from_reqwest(&url, e))?;
        response.json().await.map_err(|e| from_reqwest(&url, e))
    }

    /// Post a form to `/predict` and return the response text.
    pub async fn predict(&self, form: &PredictionForm) -> Result<String> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .http
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(|e| from_reqwest(&url, e))?
            .error_for_status()
            .map_err(|e| from_reqwest(&url, e))?;
        response.text().await.map_err(|e| from_reqwest(&url, e))
    }

    /// Post a form and parse the predicted price.
    ///
    /// A rejection or error text from the server becomes
    /// [`LustreError::Inference`] carrying that text.
    pub async fn predict_price(&self, form: &PredictionForm) -> Result<f64> {
        let text = self.predict(form).await?;
        parse_price(&text).ok_or(LustreError::Inference(text))
    }
}

/// Extract the price from a formatted prediction response.
pub fn parse_price(text: &str) -> Option<f64> {
    text.strip_prefix(PREDICTION_PREFIX)?.trim().parse().ok()
}

fn from_reqwest(url: &str, err: reqwest::Error) -> LustreError {
    LustreError::Http(format!("request to {url} failed: {err}"))
}
