//! Repository configuration

use crate::error::ConfigError;
use anyhow::Context;
use ontorepo_loader::{MappingError, MappingRule, ResourceMapper};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Entailment maintained by the repository's store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntailmentRegime {
    #[default]
    None,
    /// Property and literal typing, maintained incrementally
    Rdf,
}

/// Number of `owl:FunctionalProperty` declarations making a property functional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalThreshold {
    #[default]
    AtLeastOne,
    /// Requires two or more declarations
    MoreThanOne,
}

impl FunctionalThreshold {
    pub fn is_functional(&self, declarations: usize) -> bool {
        match self {
            FunctionalThreshold::AtLeastOne => declarations >= 1,
            FunctionalThreshold::MoreThanOne => declarations > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Mapping rules, consulted in order
    pub mappings: Vec<MappingRule>,
    /// Map the W3C vocabularies to bundled documents and HTTP identifiers to themselves
    pub include_default_mappings: bool,
    pub entailment: EntailmentRegime,
    pub functional_threshold: FunctionalThreshold,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
            include_default_mappings: true,
            entailment: EntailmentRegime::None,
            functional_threshold: FunctionalThreshold::AtLeastOne,
        }
    }
}

impl RepositoryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Failed to parse configuration {}", path.display()))
    }

    /// Build the resource mapper described by this configuration
    ///
    /// Vocabulary rules come first and the HTTP identity rule last, so
    /// custom rules can still redirect HTTP identifiers.
    pub fn mapper(&self) -> Result<ResourceMapper, MappingError> {
        let mut mapper = ResourceMapper::new();
        if self.include_default_mappings {
            mapper.add_vocabulary_rules();
        }
        for rule in &self.mappings {
            mapper.add_rule(rule)?;
        }
        if self.include_default_mappings {
            mapper.add_http_map();
        }
        Ok(mapper)
    }
}
