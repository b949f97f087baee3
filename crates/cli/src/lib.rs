//! plait command line.
//!
//! `plait convert` re-encodes a resource (JSON ⇄ XML, compact or indented);
//! `plait inspect` prints its type, id, structural size and immediate
//! children in declaration order.

pub mod config;

use anyhow::Context;
use config::{ConvertArgs, Format, InspectArgs};
use plait_fhir::r4b::Resource;
use plait_fhir::{FhirPathElement, FhirResource, MemSize};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

pub use config::{CliConfig, Command};

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("plait={level},plait_cli={level},plait_serde={level}"))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Runs the selected subcommand, writing results to `out` unless a
/// conversion names an output file.
pub fn run(config: &CliConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    match &config.command {
        Command::Convert(args) => convert(args, out),
        Command::Inspect(args) => inspect(args, out),
    }
}

pub fn read_resource(path: &Path, format: Format) -> anyhow::Result<Resource> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), %format, bytes = text.len(), "read input");
    let resource = match format {
        Format::Json => plait_serde::from_json_str::<Resource>(&text),
        Format::Xml => plait_serde::from_xml_str::<Resource>(&text),
    }
    .with_context(|| format!("failed to decode {} as {}", path.display(), format))?;
    Ok(resource)
}

pub fn encode_resource(resource: &Resource, format: Format, pretty: bool) -> anyhow::Result<String> {
    let text = match (format, pretty) {
        (Format::Json, false) => plait_serde::to_json_string(resource)?,
        (Format::Json, true) => plait_serde::to_json_string_pretty(resource)?,
        (Format::Xml, false) => plait_serde::to_xml_string(resource)?,
        (Format::Xml, true) => plait_serde::to_xml_string_pretty(resource)?,
    };
    Ok(text)
}

pub fn convert(args: &ConvertArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let from = args
        .input_format()
        .context("input format unknown; pass --from")?;
    let to = args.output_format().unwrap_or(from);

    let resource = read_resource(&args.input, from)?;
    let text = encode_resource(&resource, to, args.pretty)?;
    info!(
        resource_type = resource.resource_type(),
        %from,
        %to,
        "converted resource"
    );

    match &args.output {
        Some(path) => std::fs::write(path, &text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => writeln!(out, "{text}")?,
    }
    Ok(())
}

pub fn inspect(args: &InspectArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let format = args
        .input_format()
        .context("input format unknown; pass --format")?;
    let resource = read_resource(&args.input, format)?;

    writeln!(out, "resourceType: {}", resource.resource_type())?;
    if let Some(id) = resource.resource_id() {
        writeln!(out, "id: {id}")?;
    }
    writeln!(out, "memSize: {}", resource.mem_size())?;
    writeln!(out, "children:")?;

    let names: Vec<&str> = args.names.iter().map(String::as_str).collect();
    for (name, child) in resource.named_children() {
        if names.is_empty() || names.contains(&name) {
            writeln!(out, "  {name}: {}", child.type_name())?;
        }
    }
    Ok(())
}
