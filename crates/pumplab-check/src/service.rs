//! [`PumpingService`]: the single entry point a presentation layer needs.
//!
//! The service borrows a [`Catalog`] and forwards each call to the module
//! that implements it. It holds no other state and is `Copy`, so it can be
//! handed to any number of callers.

use serde::{Deserialize, Serialize};

use pumplab_core::catalog::Catalog;
use pumplab_core::decomposition::Decomposition;
use pumplab_core::error::PumpError;
use pumplab_core::language::LanguageDefinition;
use pumplab_core::types::FormalType;

use crate::analyze::{analyze, AnalysisVerdict};
use crate::generate::{generate_sample, random_sample, SampleConfig};
use crate::membership::{test_membership, MembershipOutcome};
use crate::suggest::suggest_decomposition;
use crate::validate::{validate, ConstraintReport};

/// Id and display name of one listed language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageListing {
    pub id: String,
    pub name: String,
}

/// Facade over a language catalog.
#[derive(Debug, Clone, Copy)]
pub struct PumpingService<'c> {
    catalog: &'c Catalog,
}

impl PumpingService<'static> {
    /// A service over the built-in catalog.
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }
}

impl<'c> PumpingService<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Languages of one formal type, in registration order.
    pub fn list_languages(&self, formal_type: FormalType) -> Vec<LanguageListing> {
        self.catalog
            .list_by_type(formal_type)
            .into_iter()
            .map(|lang| LanguageListing {
                id: lang.id().to_string(),
                name: lang.name().to_string(),
            })
            .collect()
    }

    pub fn get_language(&self, id: &str) -> Result<&'c LanguageDefinition, PumpError> {
        self.catalog.lookup(id)
    }

    /// Validates `decomposition` of `source` against the pumping length of
    /// language `id`.
    pub fn validate_decomposition(
        &self,
        id: &str,
        source: &str,
        decomposition: &Decomposition,
    ) -> Result<ConstraintReport, PumpError> {
        let lang = self.catalog.lookup(id)?;
        Ok(validate(source, decomposition, lang.pumping_length()))
    }

    pub fn pump(&self, decomposition: &Decomposition, count: i64) -> Result<String, PumpError> {
        pumplab_core::pump::pump(decomposition, count)
    }

    pub fn test_membership(&self, id: &str, candidate: &str) -> Result<MembershipOutcome, PumpError> {
        test_membership(self.catalog, id, candidate)
    }

    pub fn generate_sample(&self, id: &str, length: usize) -> Result<String, PumpError> {
        generate_sample(self.catalog, id, length)
    }

    pub fn random_sample(&self, id: &str, config: &SampleConfig) -> Result<String, PumpError> {
        random_sample(self.catalog, id, config)
    }

    pub fn analyze(
        &self,
        id: &str,
        decomposition: &Decomposition,
        pump_counts: &[i64],
    ) -> Result<AnalysisVerdict, PumpError> {
        analyze(self.catalog, id, decomposition, pump_counts)
    }

    pub fn suggest(&self, id: &str, source: &str) -> Result<Option<Decomposition>, PumpError> {
        suggest_decomposition(self.catalog, id, source)
    }
}
