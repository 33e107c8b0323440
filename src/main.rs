//! Texport CLI - Command-line tool for converting split game textures.
//!
//! This is the main entry point for the Texport command-line application.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use texport::prelude::*;

/// Texport - split DDS texture to TIFF converter
#[derive(Parser)]
#[command(name = "texport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DDS texture (or a folder of them) to images
    Convert {
        /// Base DDS file or directory
        #[arg(short, long, env = "INPUT_TEXTURE")]
        input: PathBuf,

        /// Output image (.tif/.png) or directory; defaults to next to the input
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: Option<PathBuf>,

        /// Also write the reassembled DDS
        #[arg(long)]
        save_raw: bool,

        /// Write the alpha surface as a separate gloss image
        #[arg(long)]
        separate_gloss: bool,

        /// Delete the source files after a successful conversion
        #[arg(long)]
        delete_source: bool,

        /// Descend into subdirectories when the input is a directory
        #[arg(short, long)]
        recursive: bool,

        /// Output container
        #[arg(short, long, value_enum, default_value_t = Format::Tiff)]
        format: Format,

        /// Worker threads (defaults to the number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Show the header of a DDS file
    Info {
        /// DDS file
        input: PathBuf,

        /// The file has no magic (separate alpha surface)
        #[arg(long)]
        trimmed: bool,
    },

    /// Merge split DDS files into one DDS
    Merge {
        /// Input DDS file (base file without .N suffix)
        #[arg(short, long)]
        input: PathBuf,

        /// Output DDS file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Tiff,
    Png,
}

impl From<Format> for ContainerFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Tiff => ContainerFormat::Tiff,
            Format::Png => ContainerFormat::Png,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            save_raw,
            separate_gloss,
            delete_source,
            recursive,
            format,
            jobs,
        } => {
            let options = ConvertOptions {
                save_raw_dds: save_raw,
                separate_gloss,
                delete_source,
                container: format.into(),
            };
            if input.is_dir() {
                cmd_convert_dir(&input, output.as_deref(), recursive, jobs, &options)?;
            } else {
                cmd_convert_file(&input, output.as_deref(), &options)?;
            }
        }
        Commands::Info { input, trimmed } => {
            cmd_info(&input, trimmed)?;
        }
        Commands::Merge { input, output } => {
            cmd_merge(&input, &output)?;
        }
    }

    Ok(())
}

fn cmd_convert_file(input: &Path, output: Option<&Path>, options: &ConvertOptions) -> Result<()> {
    let target = OutputTarget::from_cli_path(output);
    let converter = Converter::new(ImageDdsCodec::new());

    let start = Instant::now();
    let report = converter
        .convert(input, &target, options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    for path in &report.written {
        println!("Wrote {}", path.display());
    }
    for path in &report.deleted {
        println!("Deleted {}", path.display());
    }
    println!(
        "Converted {} ({:?}, {}) in {:?}",
        input.display(),
        report.kind,
        report.format,
        start.elapsed()
    );

    Ok(())
}

fn cmd_convert_dir(
    input: &Path,
    output: Option<&Path>,
    recursive: bool,
    jobs: Option<usize>,
    options: &ConvertOptions,
) -> Result<()> {
    let target = OutputTarget::from_cli_path(output);
    let OutputTarget::Directory(output_dir) = target else {
        bail!("Output must be a directory when converting a folder");
    };

    let inputs = collect_inputs(input, recursive)
        .with_context(|| format!("Failed to scan {}", input.display()))?;
    if inputs.is_empty() {
        println!("No DDS files found in {}", input.display());
        return Ok(());
    }

    println!("Converting {} textures...", inputs.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .context("Failed to build thread pool")?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let converter = Converter::new(ImageDdsCodec::new());
    let start = Instant::now();
    let report = pool.install(|| {
        converter.convert_batch(input, &inputs, output_dir.as_deref(), options, |done, _| {
            pb.set_position(done as u64)
        })
    });
    pb.finish_with_message("Done");

    for (path, error) in report.failed() {
        eprintln!("Error converting {}: {}", path.display(), error);
    }
    println!(
        "Converted {} textures ({} errors) in {:?}",
        report.success_count(),
        report.failure_count(),
        start.elapsed()
    );

    Ok(())
}

fn cmd_info(input: &Path, trimmed: bool) -> Result<()> {
    let magic = if trimmed {
        MagicMode::Trimmed
    } else {
        MagicMode::Expect
    };
    let file = DdsFile::open(input, magic)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let header = file.header();

    println!("File:        {}", input.display());
    println!("Format:      {}", header.pixel_format());
    println!("Size:        {}x{}", header.width(), header.height());
    println!("Mipmaps:     {}", header.mipmap_count());
    println!("DX10 header: {}", if header.dx10.is_some() { "yes" } else { "no" });
    println!("Payload:     {} bytes", file.data().len());

    Ok(())
}

fn cmd_merge(input: &Path, output: &Path) -> Result<()> {
    println!("Merging DDS: {} -> {}", input.display(), output.display());

    let converter = Converter::new(ImageDdsCodec::new());
    let chain = converter
        .merge_raw(input, output)
        .context("Failed to merge DDS files")?;

    println!(
        "Merge complete ({} sidecars, {} bytes of payload)",
        chain.color_sidecars().len(),
        chain.color().data().len()
    );

    Ok(())
}
