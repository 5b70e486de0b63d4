//! Terminology service clients
//!
//! Async clients for the two code systems the bridge consumes — the NAMASTE
//! portal and the WHO ICD-11 API — plus the downstream EMR that accepts
//! dual-coded diagnosis submissions. Both terminology clients implement
//! [`TerminologyProvider`], so the server can treat them uniformly and tests
//! can substitute in-memory fakes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use setu_terminology::{NamasteClient, TerminologyProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NamasteClient::new("https://namaste.example/api/".into(), "key".into())?;
//! let entries = client.lookup("amavata").await?;
//! # Ok(())
//! # }
//! ```

pub mod emr;
pub mod error;
pub mod icd11;
pub mod models;
pub mod namaste;
pub mod provider;

pub use emr::{DiagnosisSubmission, EmrClient, EmrSink, SubmissionOutcome};
pub use error::{Error, Result};
pub use icd11::Icd11Client;
pub use models::CodeEntry;
pub use namaste::NamasteClient;
pub use provider::TerminologyProvider;
