//! Command-line interface for the umlscribe utility
//!
//! Reads a record file written by the class extractor and prints the class
//! diagram in the chosen notation.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use umlscribe::core::logging::init_logging;
use umlscribe::plugins::NotationRegistry;
use umlscribe::{split_records, DiagramError, RenderOutput};

/// umlscribe - Turn class record streams into class diagrams
#[derive(Parser)]
#[command(name = "umlscribe")]
#[command(about = "Render class record files as PlantUML or yUML class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Record file written by the class extractor
    #[arg(value_name = "RECORD_FILE")]
    pub input: PathBuf,

    /// Output notation (plantuml|yuml)
    #[arg(short, long, default_value = "yuml")]
    pub notation: String,

    /// Simple name of an entity to leave out; repeat for several
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Output file for the diagram (use - for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when any record line is malformed instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Main CLI application
pub struct UmlscribeApp {
    registry: NotationRegistry,
}

impl UmlscribeApp {
    /// Create a new application instance with the built-in notations
    pub fn new() -> Self {
        Self {
            registry: NotationRegistry::with_default_notations(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("UMLSCRIBE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("UMLSCRIBE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            debug!("Logging already initialized: {}", e);
        }

        if cli.verbose {
            eprintln!("umlscribe v{}", env!("CARGO_PKG_VERSION"));
        }

        let output = self.render_file(&cli.input, &cli.notation, &cli.ignore, cli.verbose)?;

        if cli.strict && !output.is_clean() {
            return Err(anyhow!(
                "{} malformed record(s) in '{}'",
                output.malformed.len(),
                cli.input.display()
            ));
        }

        self.write_output(cli.output, &output.text())?;
        Ok(())
    }

    /// Read, filter and render one record file
    pub fn render_file(
        &self,
        path: &Path,
        notation: &str,
        ignore: &[String],
        verbose: bool,
    ) -> Result<RenderOutput> {
        if !path.exists() {
            return Err(anyhow!("Invalid record file path: {}", path.display()));
        }

        let content = self.read_input(path)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let lines = split_records(&content);
        let ignored: HashSet<String> = ignore.iter().cloned().collect();
        let output = self
            .registry
            .render_with_ignored(notation, &lines, &ignored)?;

        if verbose {
            for record in &output.malformed {
                eprintln!("Skipped malformed record: {}", record);
            }
            eprintln!(
                "Rendered {} entities and {} relations as {}",
                output.entity_count, output.relation_count, notation
            );
        }
        info!(path = %path.display(), notation, "Rendered record file");

        Ok(output)
    }

    /// Read the record file
    pub fn read_input(&self, path: &Path) -> Result<String, DiagramError> {
        fs::read_to_string(path).map_err(|e| DiagramError::unreadable_source(path, e))
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, &content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the registry (for testing)
    #[cfg(test)]
    pub fn registry(&self) -> &NotationRegistry {
        &self.registry
    }
}

impl Default for UmlscribeApp {
    fn default() -> Self {
        Self::new()
    }
}
