//! Application state
//!
//! All process-wide read-only values live here: the loaded configuration,
//! the concept map, and the outbound service clients. The state is built
//! once at startup and cloned cheaply into handlers; the concept map is
//! never mutated after loading, so concurrent requests share it without
//! locking. Collaborators are held as trait objects so tests can inject
//! in-memory fakes.

use crate::config::Config;
use anyhow::Context;
use setu_concept_map::ConceptMap;
use setu_terminology::{EmrClient, EmrSink, Icd11Client, NamasteClient, TerminologyProvider};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    concept_map: ConceptMap,
    namaste: Arc<dyn TerminologyProvider>,
    icd11: Arc<dyn TerminologyProvider>,
    emr: Arc<dyn EmrSink>,
}

impl AppState {
    /// Build production state: load the concept map (startup precondition)
    /// and construct the real outbound clients from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // The concept map is a startup precondition: refuse to serve
        // without it rather than answering requests with a partial table.
        let concept_map = ConceptMap::from_path(&config.mapping.path)
            .context("Failed to load concept map")?;

        let namaste = NamasteClient::new(
            config.namaste.base_url.clone(),
            config.namaste.api_key.clone(),
        )
        .context("Failed to build NAMASTE client")?;

        let icd11 = Icd11Client::new(
            config.icd11.base_url.clone(),
            config.icd11.token_url.clone(),
            config.icd11.client_id.clone(),
            config.icd11.client_secret.clone(),
        )
        .context("Failed to build ICD-11 client")?;

        let emr = EmrClient::new(config.emr.base_url.clone(), config.emr.api_key.clone())
            .context("Failed to build EMR client")?;

        Ok(Self::with_collaborators(
            config,
            concept_map,
            Arc::new(namaste),
            Arc::new(icd11),
            Arc::new(emr),
        ))
    }

    /// Build state from explicit collaborators. Used by tests to inject
    /// fakes; production goes through [`AppState::new`].
    pub fn with_collaborators(
        config: Config,
        concept_map: ConceptMap,
        namaste: Arc<dyn TerminologyProvider>,
        icd11: Arc<dyn TerminologyProvider>,
        emr: Arc<dyn EmrSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                concept_map,
                namaste,
                icd11,
                emr,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn concept_map(&self) -> &ConceptMap {
        &self.inner.concept_map
    }

    pub fn namaste(&self) -> &dyn TerminologyProvider {
        self.inner.namaste.as_ref()
    }

    pub fn icd11(&self) -> &dyn TerminologyProvider {
        self.inner.icd11.as_ref()
    }

    pub fn emr(&self) -> &dyn EmrSink {
        self.inner.emr.as_ref()
    }
}
