//! EMR submission client
//!
//! Submits dual-coded diagnoses to the downstream EMR system. The payload
//! carries both code systems side by side so the record satisfies the EHR
//! dual-coding requirement.

use crate::error::{Error, Result};
use crate::models::CodeEntry;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SERVICE: &str = "EMR";

/// A dual-coded diagnosis ready for EMR submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisSubmission {
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter_date: Option<String>,
    pub diagnoses: Vec<CodedDiagnosis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodedDiagnosis {
    pub system: String,
    pub code: String,
    pub display: String,
}

impl DiagnosisSubmission {
    /// Build the dual-coded payload from a NAMASTE diagnosis and its ICD-11
    /// counterpart.
    pub fn dual_coded(
        patient_id: String,
        encounter_date: Option<String>,
        namaste: &CodeEntry,
        icd11: &CodeEntry,
    ) -> Self {
        Self {
            patient_id,
            encounter_date,
            diagnoses: vec![
                CodedDiagnosis {
                    system: "NAMASTE".to_string(),
                    code: namaste.code.clone(),
                    display: namaste.display.clone(),
                },
                CodedDiagnosis {
                    system: "ICD11-TM2".to_string(),
                    code: icd11.code.clone(),
                    display: icd11.display.clone(),
                },
            ],
        }
    }
}

/// Result of a successful EMR submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub status: String,
    pub message: String,
}

/// Anything that can accept a dual-coded diagnosis submission.
#[async_trait]
pub trait EmrSink: Send + Sync {
    async fn submit(&self, submission: &DiagnosisSubmission) -> Result<SubmissionOutcome>;
}

/// HTTP client for the downstream EMR.
pub struct EmrClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EmrClient {
    /// Create a new EMR client with default settings.
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn diagnosis_url(&self) -> String {
        format!("{}/diagnosis", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmrSink for EmrClient {
    async fn submit(&self, submission: &DiagnosisSubmission) -> Result<SubmissionOutcome> {
        let response = self
            .client
            .post(self.diagnosis_url())
            .bearer_auth(&self.api_key)
            .json(submission)
            .send()
            .await?;

        // The EMR acknowledges accepted records with 201 specifically.
        if response.status() != StatusCode::CREATED {
            return Err(Error::Upstream {
                service: SERVICE,
                status: response.status(),
            });
        }

        Ok(SubmissionOutcome {
            status: "success".to_string(),
            message: "Diagnosis submitted successfully".to_string(),
        })
    }
}
