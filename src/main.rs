use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use csv_joiner::{InputFile, MergeOptions, RoundingMode, SessionState};

#[derive(Parser)]
#[command(name = "csv-joiner")]
#[command(about = "Merge CSV files in a chosen order, rounding joint X/Y/Z columns")]
#[command(version)]
struct Cli {
    /// CSV files to merge, in upload order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output path (`-` writes to stdout)
    #[arg(short, long, default_value = "combined.csv")]
    output: PathBuf,

    /// Explicit merge order as comma-separated file names
    #[arg(long, value_delimiter = ',', conflicts_with = "positions")]
    order: Option<Vec<String>>,

    /// Position number for each input file; ties keep upload order
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    positions: Option<Vec<i64>>,

    /// Drop every column ending in _Confidence
    #[arg(long)]
    drop_confidence: bool,

    /// Tie-breaking rule when rounding joint coordinates
    #[arg(long, value_enum)]
    rounding: Option<RoundingMode>,

    /// JSON file with default merge options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut options = match &cli.config {
        Some(path) => MergeOptions::from_json_file(path)?,
        None => MergeOptions::default(),
    };
    if cli.drop_confidence {
        options.drop_confidence_columns = true;
    }
    if let Some(rounding) = cli.rounding {
        options.rounding = rounding;
    }

    let mut session = SessionState {
        options,
        ..Default::default()
    };
    session.set_uploads(read_inputs(&cli.files)?);

    if let Some(order) = &cli.order {
        session.set_order(order).context("applying --order")?;
    } else if let Some(positions) = &cli.positions {
        session
            .set_positions(positions)
            .context("applying --positions")?;
    }

    let output = session.merge()?;

    if cli.output == Path::new("-") {
        std::io::stdout()
            .lock()
            .write_all(&output.bytes)
            .context("writing to stdout")?;
    } else {
        std::fs::write(&cli.output, &output.bytes)
            .with_context(|| format!("writing {}", cli.output.display()))?;
        info!(
            "wrote {} rows to {} ({})",
            output.row_count,
            cli.output.display(),
            output.mime
        );
    }
    Ok(())
}

/// Read every input path; the file name is its identifier in the merge order.
fn read_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    paths
        .iter()
        .map(|path| {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => bail!("not a file path: {}", path.display()),
            };
            let content =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(InputFile::new(name, content))
        })
        .collect()
}
