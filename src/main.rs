//! `mipgen` command-line front end.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use mipgen::manifest::{write_level_files, Manifest};
use mipgen::options::{ManifestFormat, Options};

/// Generate a gamma-correct mipmap pyramid from a PNG or JPEG image.
#[derive(Debug, Parser)]
#[command(name = "mipgen", version, about)]
struct Cli {
    /// Source image (`.png` or `.jpg`).
    input: PathBuf,
    /// TOML options file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Coarsest level to generate (-1 = down to 1x1).
    #[arg(long, allow_hyphen_values = true)]
    max_level: Option<i32>,
    /// JPEG quality, 1-100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,
    /// Manifest format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Manifest destination; stdout when omitted.
    #[arg(long, short)]
    out: Option<PathBuf>,
    /// Also write each level as an image file into this directory.
    #[arg(long)]
    levels_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Json,
    Js,
}

impl From<FormatArg> for ManifestFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Js => Self::Js,
        }
    }
}

fn resolve_options(cli: &Cli) -> anyhow::Result<Options> {
    let mut options = match &cli.config {
        Some(path) => Options::load(path).with_context(|| {
            format!("failed to load options from {}", path.display())
        })?,
        None => Options::default(),
    };
    if let Some(max_level) = cli.max_level {
        options.mipmap.max_level = max_level;
    }
    if let Some(quality) = cli.quality {
        options.mipmap.jpeg_quality = quality;
    }
    if let Some(format) = cli.format {
        options.output.format = format.into();
    }
    if cli.levels_dir.is_some() {
        options.output.write_levels = true;
    }
    Ok(options)
}

/// Directory level files go to, or `None` when they are not written.
/// Defaults to the input's own directory.
fn levels_dir(cli: &Cli, options: &Options) -> Option<PathBuf> {
    if !options.output.write_levels {
        return None;
    }
    Some(cli.levels_dir.clone().unwrap_or_else(|| {
        cli.input.parent().map_or_else(PathBuf::new, Path::to_path_buf)
    }))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "level".to_owned(), |s| s.to_string_lossy().into_owned())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = resolve_options(cli)?;
    let mipmap = mipgen::create_mipmap(&cli.input, &options.mipmap)
        .with_context(|| {
            format!("failed to create mipmap for {}", cli.input.display())
        })?;

    if let Some(dir) = levels_dir(cli, &options) {
        let written =
            write_level_files(&mipmap, &dir, &file_stem(&cli.input))
                .with_context(|| {
                    format!("failed to write levels to {}", dir.display())
                })?;
        log::info!("wrote {} level files to {}", written.len(), dir.display());
    }

    let rendered =
        Manifest::from(&mipmap).render(options.output.format)?;
    match &cli.out {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| {
                format!("failed to write manifest {}", path.display())
            })?;
            log::info!("wrote manifest {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
