//! Supported document syntaxes and the extension table used to detect them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Family a syntax belongs to, which decides the loader capability used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxFamily {
    /// Documents made of statements
    Rdf,
    /// Documents made of axioms
    Owl,
}

/// A document syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Syntax {
    NTriples,
    NQuads,
    Turtle,
    TriG,
    RdfTransform,
    RdfXml,
    JsonLd,
    FunctionalOwl,
    OwlXml,
    ExtendedOwl,
}

/// Extension table, scanned in order
const EXTENSIONS: &[(&str, Syntax)] = &[
    (".nt", Syntax::NTriples),
    (".nq", Syntax::NQuads),
    (".ttl", Syntax::Turtle),
    (".rdft", Syntax::RdfTransform),
    (".rdf", Syntax::RdfXml),
    (".jsonld", Syntax::JsonLd),
    (".trig", Syntax::TriG),
    (".ofn", Syntax::FunctionalOwl),
    (".fs", Syntax::FunctionalOwl),
    (".owx", Syntax::OwlXml),
    (".owl", Syntax::OwlXml),
    (".xowl", Syntax::ExtendedOwl),
];

impl Syntax {
    pub const ALL: [Syntax; 10] = [
        Syntax::NTriples,
        Syntax::NQuads,
        Syntax::Turtle,
        Syntax::TriG,
        Syntax::RdfTransform,
        Syntax::RdfXml,
        Syntax::JsonLd,
        Syntax::FunctionalOwl,
        Syntax::OwlXml,
        Syntax::ExtendedOwl,
    ];

    /// Detect the syntax of a physical location from its extension
    pub fn from_location(location: &str) -> Option<Syntax> {
        EXTENSIONS
            .iter()
            .find(|(extension, _)| location.ends_with(extension))
            .map(|(_, syntax)| *syntax)
    }

    pub fn from_mime_type(mime: &str) -> Option<Syntax> {
        Syntax::ALL.into_iter().find(|syntax| syntax.mime_type() == mime)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Syntax::NTriples => "application/n-triples",
            Syntax::NQuads => "application/n-quads",
            Syntax::Turtle => "text/turtle",
            Syntax::TriG => "application/trig",
            Syntax::RdfTransform => "application/x-xowl-rdft",
            Syntax::RdfXml => "application/rdf+xml",
            Syntax::JsonLd => "application/ld+json",
            Syntax::FunctionalOwl => "text/owl-functional",
            Syntax::OwlXml => "application/owl+xml",
            Syntax::ExtendedOwl => "application/x-xowl",
        }
    }

    /// Preferred file extension, with the leading dot
    pub fn extension(&self) -> &'static str {
        EXTENSIONS
            .iter()
            .find(|(_, syntax)| syntax == self)
            .map(|(extension, _)| *extension)
            .unwrap_or_default()
    }

    pub fn family(&self) -> SyntaxFamily {
        match self {
            Syntax::NTriples
            | Syntax::NQuads
            | Syntax::Turtle
            | Syntax::TriG
            | Syntax::RdfTransform
            | Syntax::RdfXml
            | Syntax::JsonLd => SyntaxFamily::Rdf,
            Syntax::FunctionalOwl | Syntax::OwlXml | Syntax::ExtendedOwl => SyntaxFamily::Owl,
        }
    }

    /// Whether a document in this syntax can hold several graphs
    pub fn supports_datasets(&self) -> bool {
        matches!(self, Syntax::NQuads | Syntax::TriG | Syntax::JsonLd)
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(Syntax::from_location("file:///data/a.nt"), Some(Syntax::NTriples));
        assert_eq!(Syntax::from_location("a.nq"), Some(Syntax::NQuads));
        assert_eq!(Syntax::from_location("a.ttl"), Some(Syntax::Turtle));
        assert_eq!(Syntax::from_location("a.rdft"), Some(Syntax::RdfTransform));
        assert_eq!(Syntax::from_location("a.rdf"), Some(Syntax::RdfXml));
        assert_eq!(Syntax::from_location("a.jsonld"), Some(Syntax::JsonLd));
        assert_eq!(Syntax::from_location("a.ofn"), Some(Syntax::FunctionalOwl));
        assert_eq!(Syntax::from_location("a.fs"), Some(Syntax::FunctionalOwl));
        assert_eq!(Syntax::from_location("a.owx"), Some(Syntax::OwlXml));
        assert_eq!(Syntax::from_location("a.owl"), Some(Syntax::OwlXml));
        assert_eq!(Syntax::from_location("a.xowl"), Some(Syntax::ExtendedOwl));
        assert_eq!(Syntax::from_location("a.txt"), None);
        assert_eq!(Syntax::from_location("http://example.org/onto"), None);
    }

    #[test]
    fn test_mime_types_are_unique_and_reversible() {
        for syntax in Syntax::ALL {
            assert_eq!(Syntax::from_mime_type(syntax.mime_type()), Some(syntax));
        }
        assert_eq!(Syntax::from_mime_type("text/plain"), None);
    }

    #[test]
    fn test_families() {
        assert_eq!(Syntax::Turtle.family(), SyntaxFamily::Rdf);
        assert_eq!(Syntax::OwlXml.family(), SyntaxFamily::Owl);
        assert!(Syntax::NQuads.supports_datasets());
        assert!(!Syntax::NTriples.supports_datasets());
        assert_eq!(Syntax::OwlXml.extension(), ".owx");
    }
}
