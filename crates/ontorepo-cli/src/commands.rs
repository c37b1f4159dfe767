//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ontorepo_core::uri;
use ontorepo_loader::{ResourceMapper, Syntax};
use ontorepo_repository::RepositoryConfig;
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "ontorepo")]
#[command(about = "Ontology repository tools: URI resolution, resource mapping and syntax detection")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a reference against a base URI (RFC 3986)
    Resolve {
        /// Base URI
        base: String,

        /// Reference to resolve
        reference: String,
    },

    /// Split a URI into its components
    Parse {
        /// URI to parse
        uri: String,
    },

    /// Map a logical identifier to its physical location
    Map {
        /// Repository configuration holding the mapping rules
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Identifier to map
        identifier: String,
    },

    /// Detect the syntax of a physical location
    Syntax {
        /// Location or file name
        location: String,
    },

    /// Show system information
    Info,
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

/// Command execution result
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl CommandResult {
    fn ok(message: String, data: serde_json::Value) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            data: None,
        }
    }

    /// Text to print for `format`
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let data = self.data.clone().unwrap_or_else(|| {
            serde_json::json!({
                "success": self.success,
                "message": self.message,
            })
        });
        Ok(match format {
            OutputFormat::Text => self.message.clone(),
            OutputFormat::Json => serde_json::to_string(&data)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&data)?,
        })
    }
}

/// Execute CLI commands
#[derive(Debug, Default)]
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute a CLI command
    pub fn execute(&self, command: Commands) -> Result<CommandResult> {
        match command {
            Commands::Resolve { base, reference } => self.execute_resolve(&base, &reference),
            Commands::Parse { uri } => self.execute_parse(&uri),
            Commands::Map { config, identifier } => self.execute_map(config, &identifier),
            Commands::Syntax { location } => Ok(self.execute_syntax(&location)),
            Commands::Info => Ok(self.execute_info()),
        }
    }

    fn execute_resolve(&self, base: &str, reference: &str) -> Result<CommandResult> {
        let resolved =
            uri::resolve(base, reference).with_context(|| format!("Cannot resolve {} against {}", reference, base))?;
        let data = serde_json::json!({
            "base": base,
            "reference": reference,
            "resolved": resolved,
        });
        Ok(CommandResult::ok(resolved, data))
    }

    fn execute_parse(&self, input: &str) -> Result<CommandResult> {
        let components = uri::parse(input).with_context(|| format!("Cannot parse {}", input))?;
        let field = |name: &str, value: &Option<String>| match value {
            Some(value) => format!("{:<10}{}", name, value),
            None => format!("{:<10}-", name),
        };
        let message = [
            field("scheme", &components.scheme),
            field("authority", &components.authority),
            format!("{:<10}{}", "path", components.path),
            field("query", &components.query),
            field("fragment", &components.fragment),
        ]
        .join("\n");
        let mut data = serde_json::to_value(&components)?;
        data["absolute"] = serde_json::Value::Bool(uri::is_absolute(input));
        Ok(CommandResult::ok(message, data))
    }

    fn execute_map(&self, config: Option<PathBuf>, identifier: &str) -> Result<CommandResult> {
        let mapper = match config {
            Some(path) => RepositoryConfig::from_path(&path)?
                .mapper()
                .with_context(|| format!("Invalid mapping rules in {}", path.display()))?,
            None => ResourceMapper::with_defaults(),
        };
        tracing::debug!("Mapping {} with {} rules", identifier, mapper.len());
        Ok(match mapper.get(identifier) {
            Some(location) => {
                let data = serde_json::json!({
                    "identifier": identifier,
                    "location": location,
                    "syntax": Syntax::from_location(&location),
                });
                CommandResult::ok(location, data)
            }
            None => CommandResult::failed(format!("Cannot identify the location of {}", identifier)),
        })
    }

    fn execute_syntax(&self, location: &str) -> CommandResult {
        match Syntax::from_location(location) {
            Some(syntax) => {
                let data = serde_json::json!({
                    "location": location,
                    "syntax": syntax,
                    "mime_type": syntax.mime_type(),
                    "family": syntax.family(),
                    "extension": syntax.extension(),
                    "datasets": syntax.supports_datasets(),
                });
                CommandResult::ok(syntax.mime_type().to_string(), data)
            }
            None => CommandResult::failed(format!("Unknown syntax for resource {}", location)),
        }
    }

    fn execute_info(&self) -> CommandResult {
        let syntaxes: Vec<&str> = Syntax::ALL.iter().map(Syntax::mime_type).collect();
        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "repository": env!("CARGO_PKG_REPOSITORY"),
            "syntaxes": syntaxes,
        });
        let message = format!(
            "{} {}\nsyntaxes: {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            syntaxes.join(", ")
        );
        CommandResult::ok(message, info)
    }
}
