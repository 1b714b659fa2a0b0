use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sb_core::RasterBuffer;
use sb_pnm::{PnmError, PnmKind};
use sb_sobel::{DEFAULT_WORKERS, FilterStats, SobelConfig, SobelFilter};
use serde::Serialize;

const USAGE_EXIT_CODE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "sobel", version)]
#[command(about = "Sobel edge magnitude of a binary PPM (P6) image, written as binary PGM (P5)")]
struct Cli {
    /// Input image, binary PPM (P6) with 8-bit samples
    input: PathBuf,

    /// Output image, binary PGM (P5)
    output: PathBuf,

    /// Number of row bands, one worker thread each
    #[arg(short = 'j', long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Write a JSON run report (dimensions, band layout, timing); best-effort
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct BandDto {
    start_row: usize,
    end_row: usize,
}

#[derive(Debug, Clone, Serialize)]
struct RunReport {
    input: String,
    output: String,
    width: usize,
    height: usize,
    workers: usize,
    elapsed_ms: f64,
    bands: Vec<BandDto>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version go to stdout with status 0.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            process::exit(USAGE_EXIT_CODE);
        }
    };

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    if cli.workers == 0 {
        bail!("--workers must be at least 1, got 0");
    }

    let input = load_input(&cli.input)?;
    log::info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        input.width(),
        input.height()
    );

    let filter = SobelFilter::new(SobelConfig { workers: cli.workers })?;
    let (output, stats) = filter
        .apply(&input)
        .with_context(|| format!("filtering {}", cli.input.display()))?;

    println!("Elapsed time: {} ms", stats.timing.elapsed_ms());

    sb_pnm::write_file(&cli.output, &output)
        .with_context(|| format!("could not create file '{}'", cli.output.display()))?;
    log::info!("wrote {}", cli.output.display());

    // Best-effort: the image is already on disk.
    if let Some(path) = &cli.report
        && let Err(err) = write_json(path, &run_report(&cli, &input, &stats))
    {
        log::warn!("run report not written: {err:#}");
    }

    Ok(())
}

fn load_input(path: &Path) -> Result<RasterBuffer> {
    sb_pnm::read_file(path, PnmKind::Pixmap).map_err(|err| {
        let what = match &err {
            PnmError::Io(_) => format!("could not read file '{}'", path.display()),
            PnmError::UnsupportedMaxval(_) => format!(
                "file '{}' has more than 8 bits per channel",
                path.display()
            ),
            _ => format!("file '{}' is not a valid PPM image", path.display()),
        };
        anyhow::Error::new(err).context(what)
    })
}

fn run_report(cli: &Cli, input: &RasterBuffer, stats: &FilterStats) -> RunReport {
    RunReport {
        input: cli.input.display().to_string(),
        output: cli.output.display().to_string(),
        width: input.width(),
        height: input.height(),
        workers: cli.workers,
        elapsed_ms: stats.timing.elapsed_ms_f64(),
        bands: stats
            .bands
            .iter()
            .map(|b| BandDto {
                start_row: b.start_row,
                end_row: b.end_row,
            })
            .collect(),
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}
