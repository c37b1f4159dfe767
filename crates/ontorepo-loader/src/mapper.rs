//! Mapping of logical identifiers to physical locations
//!
//! A [`ResourceMapper`] is an ordered list of rules. The first rule whose
//! pattern matches the whole identifier produces the location; later rules
//! are not consulted.

use crate::error::MappingError;
use ontorepo_core::vocabulary::{OWL, RDF, RDFS};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Serializable description of a mapping rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingRule {
    /// Identifier matched as a whole-string pattern, location copied verbatim
    Simple { pattern: String, location: String },
    /// Identifiers starting with `prefix` map to `location` followed by the remainder
    Prefix { prefix: String, location: String },
    /// Pattern with a `\N` back-reference template
    Regex { pattern: String, template: String },
    /// HTTP(S) identifiers map to themselves
    Http,
}

#[derive(Debug, Clone)]
enum Rule {
    Pattern { pattern: Regex, template: String },
    Http,
}

impl Rule {
    fn pattern(pattern: &str, template: String) -> Result<Self, MappingError> {
        let anchored = format!("^(?:{})$", pattern);
        let pattern = Regex::new(&anchored).map_err(|source| MappingError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Rule::Pattern { pattern, template })
    }

    fn apply(&self, identifier: &str) -> Option<String> {
        match self {
            Rule::Pattern { pattern, template } => {
                let captures = pattern.captures(identifier)?;
                Some(expand(template, &captures))
            }
            Rule::Http => (identifier.starts_with("http://") || identifier.starts_with("https://"))
                .then(|| identifier.to_string()),
        }
    }
}

/// Expand `\N` back-references and `\\` escapes in a template
fn expand(template: &str, captures: &Captures<'_>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('\\') => {
                chars.next();
                result.push('\\');
            }
            Some(digit) if digit.is_ascii_digit() => {
                chars.next();
                let index = digit.to_digit(10).unwrap_or(0) as usize;
                if let Some(group) = captures.get(index) {
                    result.push_str(group.as_str());
                }
            }
            _ => result.push(c),
        }
    }
    result
}

/// Ordered rule list translating identifiers into physical locations
#[derive(Debug, Clone, Default)]
pub struct ResourceMapper {
    rules: Vec<Rule>,
}

impl ResourceMapper {
    /// Mapper without any rule
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper with the bundled W3C vocabularies and the HTTP identity rule
    pub fn with_defaults() -> Self {
        let mut mapper = Self::new();
        mapper.add_default_rules();
        mapper
    }

    /// Build a mapper from serialized rules
    pub fn from_rules(rules: &[MappingRule]) -> Result<Self, MappingError> {
        let mut mapper = Self::new();
        for rule in rules {
            mapper.add_rule(rule)?;
        }
        Ok(mapper)
    }

    /// Append the bundled vocabulary rules and the HTTP identity rule
    pub fn add_default_rules(&mut self) {
        self.add_vocabulary_rules();
        self.add_http_map();
    }

    /// Append rules mapping the RDF, RDFS and OWL namespaces to bundled documents
    pub fn add_vocabulary_rules(&mut self) {
        for (namespace, location) in [
            (OWL, "resource:///ontorepo/vocabularies/owl2.ttl"),
            (RDF, "resource:///ontorepo/vocabularies/rdf.ttl"),
            (RDFS, "resource:///ontorepo/vocabularies/rdfs.ttl"),
        ] {
            let base = namespace.trim_end_matches('#');
            let pattern = format!("{}#?", regex::escape(base));
            match Rule::pattern(&pattern, location.to_string()) {
                Ok(rule) => self.rules.push(rule),
                Err(e) => tracing::error!("Skipping default mapping for {}: {}", namespace, e),
            }
        }
    }

    pub fn add_rule(&mut self, rule: &MappingRule) -> Result<(), MappingError> {
        match rule {
            MappingRule::Simple { pattern, location } => self.add_simple_map(pattern, location),
            MappingRule::Prefix { prefix, location } => self.add_prefix_map(prefix, location),
            MappingRule::Regex { pattern, template } => self.add_regex_map(pattern, template),
            MappingRule::Http => {
                self.add_http_map();
                Ok(())
            }
        }
    }

    /// Map identifiers matching `pattern` as a whole to `location`
    pub fn add_simple_map(&mut self, pattern: &str, location: &str) -> Result<(), MappingError> {
        let location = location.replace('\\', "\\\\");
        self.rules.push(Rule::pattern(pattern, location)?);
        Ok(())
    }

    /// Map identifiers starting with `prefix` under `location`
    pub fn add_prefix_map(&mut self, prefix: &str, location: &str) -> Result<(), MappingError> {
        let pattern = format!("{}(.*)", prefix);
        let template = format!("{}\\1", location.replace('\\', "\\\\"));
        self.rules.push(Rule::pattern(&pattern, template)?);
        Ok(())
    }

    /// Map identifiers matching `pattern` through a back-reference template
    pub fn add_regex_map(&mut self, pattern: &str, template: &str) -> Result<(), MappingError> {
        self.rules.push(Rule::pattern(pattern, template.to_string())?);
        Ok(())
    }

    /// Map every HTTP(S) identifier to itself
    pub fn add_http_map(&mut self) {
        self.rules.push(Rule::Http);
    }

    /// Physical location of `identifier`, from the first matching rule
    pub fn get(&self, identifier: &str) -> Option<String> {
        let location = self.rules.iter().find_map(|rule| rule.apply(identifier));
        if location.is_none() {
            tracing::debug!("No mapping rule matches {}", identifier);
        }
        location
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
