use clap::{Parser, ValueEnum};
use anyhow::{Context, Result};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vmd_oxide::io::{self, file, MeshFormat};
use vmd_oxide::prelude::*;
use vmd_oxide::ErrorClass;

#[derive(Parser)]
#[command(name = "vmd-cli")]
#[command(about = "A CLI tool for converting obj models to the vmd mesh format")]
struct Cli {
    /// Input file path (.obj, .vmd or .vmdt)
    input: PathBuf,

    /// Output file path. Defaults to the input's base name in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output encoding. Derived from the output extension when omitted
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Deduplicate vertices with the running-maximum scan of older converters
    #[arg(long)]
    legacy_dedup: bool,

    /// Log the details of each conversion stage
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Binary,
    Text,
}

impl From<OutputFormat> for MeshFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Binary => MeshFormat::Binary,
            OutputFormat::Text => MeshFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
        }
    };

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn convert(cli: &Cli) -> Result<()> {
    let input_format = MeshFormat::from_path(&cli.input).map_err(vmd_oxide::Err::from)?;
    let output_format = resolve_output_format(cli.format, cli.output.as_deref());
    let output_path = cli.output
        .clone()
        .unwrap_or_else(|| io::output_path_for(&cli.input, output_format));
    io::check_distinct_paths(&cli.input, &output_path).map_err(vmd_oxide::Err::from)?;

    let mut config = Config::default();
    if cli.legacy_dedup {
        config.dedup = DedupStrategy::RunningMax;
    }

    let mesh = io::load_mesh(&cli.input, &config)
        .with_context(|| format!("Failed to load {} as {:?}", cli.input.display(), input_format))?;

    info!("Vertices: {}, Indices: {}", mesh.vertex_count(), mesh.index_count());

    let buffer = match output_format {
        MeshFormat::Text => encode_text_to_string(&mesh)
            .map_err(vmd_oxide::Err::from)?
            .into_bytes(),
        _ => encode_to_vec(&mesh),
    };

    file::write_whole_file(&output_path, &buffer).map_err(vmd_oxide::Err::from)?;
    info!("Wrote {} ({} bytes)", output_path.display(), buffer.len());

    Ok(())
}

/// `--format` wins; otherwise a `.vmdt` output path selects text and anything else binary.
fn resolve_output_format(format: Option<OutputFormat>, output: Option<&Path>) -> MeshFormat {
    if let Some(format) = format {
        return format.into();
    }
    match output.and_then(|p| MeshFormat::from_path(p).ok()) {
        Some(MeshFormat::Text) => MeshFormat::Text,
        _ => MeshFormat::Binary,
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    let class = err.chain()
        .find_map(|e| e.downcast_ref::<vmd_oxide::Err>())
        .map(|e| e.class());

    match class {
        Some(ErrorClass::UnsupportedFormat) => 2,
        Some(ErrorClass::Parse) => 3,
        Some(ErrorClass::Format) => 4,
        Some(ErrorClass::Io) => 5,
        Some(ErrorClass::IndexRange) => 6,
        None => 1,
    }
}
