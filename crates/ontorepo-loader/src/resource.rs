//! Physical resource access
//!
//! Locations are strings with one of the schemes `http://`/`https://`,
//! `resource://` (bundled content), `jar://archive!entry` or `file://`;
//! anything else is a local path. Only `file://` and local paths can be
//! written.

use crate::error::LoadError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};

const SCHEME_HTTP: &str = "http://";
const SCHEME_HTTPS: &str = "https://";
const SCHEME_RESOURCE: &str = "resource://";
const SCHEME_JAR: &str = "jar://";
const SCHEME_FILE: &str = "file://";

/// A parsed physical location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    Http(&'a str),
    Bundled(&'a str),
    Archive { archive: &'a str, entry: &'a str },
    File(&'a str),
}

impl<'a> Location<'a> {
    pub fn parse(location: &'a str) -> Result<Self, LoadError> {
        if location.starts_with(SCHEME_HTTP) || location.starts_with(SCHEME_HTTPS) {
            Ok(Location::Http(location))
        } else if let Some(path) = location.strip_prefix(SCHEME_RESOURCE) {
            Ok(Location::Bundled(path.trim_start_matches('/')))
        } else if let Some(rest) = location.strip_prefix(SCHEME_JAR) {
            match rest.split_once('!') {
                Some((archive, entry)) if !archive.is_empty() && !entry.is_empty() => {
                    Ok(Location::Archive {
                        archive,
                        entry: entry.trim_start_matches('/'),
                    })
                }
                _ => Err(LoadError::MalformedLocation(location.to_string())),
            }
        } else if let Some(path) = location.strip_prefix(SCHEME_FILE) {
            Ok(Location::File(path))
        } else {
            Ok(Location::File(location))
        }
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, Location::File(_))
    }
}

/// In-memory content served under `resource://`
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    entries: HashMap<String, Vec<u8>>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle with the RDF, RDFS and OWL vocabularies
    pub fn standard() -> Self {
        let mut bundle = Self::new();
        bundle.insert("ontorepo/vocabularies/rdf.ttl", include_str!("../resources/rdf.ttl"));
        bundle.insert("ontorepo/vocabularies/rdfs.ttl", include_str!("../resources/rdfs.ttl"));
        bundle.insert("ontorepo/vocabularies/owl2.ttl", include_str!("../resources/owl2.ttl"));
        bundle
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        let path = path.into();
        self.entries
            .insert(path.trim_start_matches('/').to_string(), content.into());
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .get(path.trim_start_matches('/'))
            .map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Opens readers and writers on physical locations
#[derive(Debug, Clone, Default)]
pub struct ResourceAccess {
    bundle: ResourceBundle,
}

impl ResourceAccess {
    pub fn new(bundle: ResourceBundle) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &ResourceBundle {
        &self.bundle
    }

    pub fn bundle_mut(&mut self) -> &mut ResourceBundle {
        &mut self.bundle
    }

    pub fn open_reader(&self, location: &str) -> Result<Box<dyn Read>, LoadError> {
        match Location::parse(location)? {
            Location::Http(url) => {
                tracing::debug!("Fetching {}", url);
                let response = reqwest::blocking::get(url)
                    .and_then(|response| response.error_for_status())
                    .map_err(|source| LoadError::Http {
                        location: location.to_string(),
                        source,
                    })?;
                Ok(Box::new(response))
            }
            Location::Bundled(path) => {
                let content = self
                    .bundle
                    .get(path)
                    .ok_or_else(|| LoadError::MissingBundledResource(location.to_string()))?;
                Ok(Box::new(Cursor::new(content.to_vec())))
            }
            Location::Archive { archive, entry } => {
                let file = File::open(archive).map_err(|e| LoadError::io(location, e))?;
                let archive_error = |source| LoadError::Archive {
                    location: location.to_string(),
                    source,
                };
                let mut zip = zip::ZipArchive::new(file).map_err(archive_error)?;
                let mut entry = zip.by_name(entry).map_err(archive_error)?;
                let mut content = Vec::new();
                entry
                    .read_to_end(&mut content)
                    .map_err(|e| LoadError::io(location, e))?;
                Ok(Box::new(Cursor::new(content)))
            }
            Location::File(path) => {
                let file = File::open(path).map_err(|e| LoadError::io(location, e))?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    pub fn open_writer(&self, location: &str) -> Result<Box<dyn Write>, LoadError> {
        match Location::parse(location)? {
            Location::File(path) => {
                let file = File::create(path).map_err(|e| LoadError::io(location, e))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            _ => Err(LoadError::NotWritable(location.to_string())),
        }
    }
}
