//! Print service client
//!
//! The office copier is driven by an external print service; this module
//! only submits jobs to it over HTTP. Failures are reported to the caller
//! as-is — print jobs are synchronous request/response and never retried.

use crate::config::PrintingConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A job submitted to the print service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    /// Printer queue name
    pub printer: String,

    /// Text printed on the cover sheet
    pub cover_text: String,

    /// Documents to print, in order
    pub document_ids: Vec<i32>,

    /// Total page count across the documents
    pub total_pages: i32,

    /// Office account submitting the job
    pub submitted_by: String,
}

/// Receipt returned by the print service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintReceipt {
    pub job_id: String,
    pub accepted_pages: i32,
}

/// Seam for the external print service
#[async_trait]
pub trait PrintBackend: Send + Sync {
    /// Submit a job, returning the service's receipt
    async fn submit(&self, job: &PrintJob) -> Result<PrintReceipt>;
}

/// HTTP client for the print service
pub struct HttpPrintClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPrintClient {
    /// Create a new client from configuration
    pub fn new(config: &PrintingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to create print client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.service_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PrintBackend for HttpPrintClient {
    async fn submit(&self, job: &PrintJob) -> Result<PrintReceipt> {
        let url = format!("{}/jobs", self.base_url);

        let response = self.client.post(&url).json(job).send().await?;

        if !response.status().is_success() {
            return Err(AppError::PrintService {
                message: format!("Print service returned {}", response.status()),
            });
        }

        response.json().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrintingConfig;

    #[test]
    fn test_client_strips_trailing_slash() {
        let config = PrintingConfig {
            service_url: "http://localhost:9100/".to_string(),
            timeout_secs: 5,
            printers: vec!["office".to_string()],
        };

        let client = HttpPrintClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9100");
    }

    #[test]
    fn test_job_serialization() {
        let job = PrintJob {
            printer: "office".to_string(),
            cover_text: "Algorithmen I".to_string(),
            document_ids: vec![3, 17],
            total_pages: 24,
            submitted_by: "kasse".to_string(),
        };

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["printer"], "office");
        assert_eq!(json["total_pages"], 24);
    }
}
