mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use atlas_packer_core::{AtlasConfig, InputImage, pack_images, to_json_index};
use clap::{ArgAction, Parser};
use image::ImageReader;
use tracing::info;
use walkdir::WalkDir;

use manifest::{is_supported_image, parse_color, parse_manifest};

#[derive(Parser, Debug)]
#[command(
    name = "atlas-packer",
    about = "Pack images into a single texture atlas sheet",
    version
)]
struct Cli {
    /// Input directory or .atlas manifest file
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,
    /// Atlas base name (files will be <name>.png / <name>.json)
    #[arg(short, long, default_value = "atlas")]
    name: String,
    /// Maximum sheet dimension in pixels
    #[arg(long, default_value_t = 4096)]
    max_dimension: u32,
    /// Padding between placed images, in pixels
    #[arg(long, default_value_t = 0)]
    padding: u32,
    /// Cell alignment for placed edges (compression block size)
    #[arg(long, default_value_t = 4)]
    align: u32,
    /// Force a square sheet
    #[arg(long, default_value_t = false)]
    square: bool,
    /// Force power-of-two sheet dimensions
    #[arg(long, default_value_t = false)]
    pow2: bool,
    /// Include a solid-white placeholder cell
    #[arg(long, default_value_t = false)]
    white: bool,
    /// Fill color for unused sheet area (#AARRGGBB)
    #[arg(long, default_value = "#00000000")]
    fill: String,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let base_cfg = AtlasConfig {
        max_dimension: cli.max_dimension,
        padding: cli.padding,
        cell_align: cli.align,
        force_square: cli.square,
        force_power_of_two: cli.pow2,
        include_placeholder: cli.white,
        fill_color: parse_color(&cli.fill)?,
    };

    let (cfg, paths, root) = if cli.input.is_dir() {
        (base_cfg, gather_dir(&cli.input)?, cli.input.clone())
    } else {
        let m = parse_manifest(&cli.input, base_cfg)?;
        let root = cli
            .input
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        (m.config, m.paths, root)
    };
    if paths.is_empty() {
        bail!("no input images found in {}", cli.input.display());
    }

    let mut inputs = Vec::with_capacity(paths.len());
    for path in &paths {
        let image = ImageReader::open(path)
            .with_context(|| format!("open {}", path.display()))?
            .decode()
            .with_context(|| format!("decode {}", path.display()))?;
        inputs.push(InputImage {
            key: key_for(path, &root),
            image,
        });
    }
    info!(count = inputs.len(), "loaded input images");

    let out = pack_images(inputs, cfg)?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create out_dir {}", cli.out_dir.display()))?;
    let png_path = cli.out_dir.join(format!("{}.png", cli.name));
    out.rgba
        .save(&png_path)
        .with_context(|| format!("write {}", png_path.display()))?;
    let json_path = cli.out_dir.join(format!("{}.json", cli.name));
    let index = serde_json::to_string_pretty(&to_json_index(&out.layout))?;
    fs::write(&json_path, index).with_context(|| format!("write {}", json_path.display()))?;

    info!(
        width = out.layout.width,
        height = out.layout.height,
        entries = out.layout.entries.len(),
        occupancy = %format!("{:.1}%", out.layout.occupancy() * 100.0),
        ?png_path,
        ?json_path,
        "atlas written"
    );
    Ok(())
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Collects every supported image file under `dir`, sorted for stable input
/// order across platforms.
fn gather_dir(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_supported_image(e.path()))
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Atlas key for an image path: relative to the input root, extension
/// stripped, forward slashes.
fn key_for(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.with_extension("");
    rel.to_string_lossy().replace('\\', "/")
}
