//! Command line configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Convert and inspect FHIR R4B resources.
#[derive(Debug, Clone, Parser)]
#[command(name = "plait")]
#[command(about = "Convert FHIR R4B resources between JSON and XML and inspect their structure")]
pub struct CliConfig {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "PLAIT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Re-encode a resource, optionally switching between JSON and XML.
    Convert(ConvertArgs),
    /// Print a resource's type, id, size and immediate children.
    Inspect(InspectArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Resource to read.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the result; standard output when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input format; taken from the input's extension when omitted.
    #[arg(long, value_enum)]
    pub from: Option<Format>,

    /// Output format; taken from the output's extension, or the input format.
    #[arg(long, value_enum)]
    pub to: Option<Format>,

    /// Indent the output.
    #[arg(long, env = "PLAIT_PRETTY", default_value = "false")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Resource to read.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Input format; taken from the input's extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Only list children with these element names (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,
}

/// Wire format of a resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// Guesses the format from a file extension (`.json`, `.xml`).
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("json") {
            Some(Format::Json)
        } else if extension.eq_ignore_ascii_case("xml") {
            Some(Format::Xml)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Xml => write!(f, "xml"),
        }
    }
}

impl ConvertArgs {
    pub fn input_format(&self) -> Option<Format> {
        self.from.or_else(|| Format::from_path(&self.input))
    }

    pub fn output_format(&self) -> Option<Format> {
        self.to
            .or_else(|| self.output.as_deref().and_then(Format::from_path))
            .or_else(|| self.input_format())
    }
}

impl InspectArgs {
    pub fn input_format(&self) -> Option<Format> {
        self.format.or_else(|| Format::from_path(&self.input))
    }
}

impl CliConfig {
    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !matches!(
            self.log_level.to_ascii_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            errors.push(format!("Unknown log level `{}`", self.log_level));
        }

        match &self.command {
            Command::Convert(args) => {
                if args.input_format().is_none() {
                    errors.push(format!(
                        "Cannot tell the format of `{}`; pass --from",
                        args.input.display()
                    ));
                }
                if args.output.as_deref() == Some(args.input.as_path()) {
                    errors.push("Output must not overwrite the input".to_string());
                }
            }
            Command::Inspect(args) => {
                if args.input_format().is_none() {
                    errors.push(format!(
                        "Cannot tell the format of `{}`; pass --format",
                        args.input.display()
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
