//! Patient record submission handler
//!
//! `POST /api/submit-patient-record` accepts a dual-coded diagnosis and
//! forwards it to the downstream EMR.

use crate::{state::AppState, Error, Result};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use setu_terminology::{CodeEntry, DiagnosisSubmission, SubmissionOutcome};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecordRequest {
    patient_id: Option<String>,
    encounter_date: Option<String>,
    namaste_diagnosis: Option<CodeEntry>,
    icd11_code: Option<CodeEntry>,
}

pub async fn submit_patient_record(
    State(state): State<AppState>,
    Json(body): Json<PatientRecordRequest>,
) -> Result<(StatusCode, Json<SubmissionOutcome>)> {
    let patient_id = body
        .patient_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(missing_patient_data)?;
    let namaste_diagnosis = body.namaste_diagnosis.ok_or_else(missing_patient_data)?;
    let icd11_code = body.icd11_code.ok_or_else(missing_patient_data)?;

    let submission = DiagnosisSubmission::dual_coded(
        patient_id,
        body.encounter_date,
        &namaste_diagnosis,
        &icd11_code,
    );

    let outcome = state
        .emr()
        .submit(&submission)
        .await
        .map_err(|error| Error::EmrSubmission(error.to_string()))?;

    tracing::info!(
        patient_id = %submission.patient_id,
        namaste_code = %namaste_diagnosis.code,
        icd11_code = %icd11_code.code,
        "Patient record submitted"
    );

    Ok((StatusCode::CREATED, Json(outcome)))
}

fn missing_patient_data() -> Error {
    Error::Validation("Missing required patient data".to_string())
}
