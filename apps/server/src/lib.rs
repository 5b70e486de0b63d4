//! Terminology bridge server
//!
//! An HTTP service bridging the NAMASTE traditional-medicine terminology and
//! the ICD-11 classification:
//! - Free-text diagnosis search returning dual-coded suggestions
//! - Cross-referencing through a curated local concept map
//! - Dual-coded patient record submission to a downstream EMR

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
