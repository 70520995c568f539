//! Atlas manifest parsing: a plain-text file listing the images to pack
//! plus packing properties.
//!
//! Format, one entry per line:
//! - `// comment` and blank lines are skipped
//! - `key = value` sets a property: `square`, `poweroftwo`, `whitetexture`,
//!   `maxdimension`, `padding`, `cellalign`, `unusedcolor` (`#AARRGGBB`)
//! - a bare path adds images: a single file, a directory (scanned
//!   recursively), or a `*` wildcard pattern
//! - `- path` removes previously added images (wildcards allowed)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use atlas_packer_core::AtlasConfig;
use globset::Glob;
use walkdir::WalkDir;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tga", "tif", "tiff"];

pub struct Manifest {
    pub config: AtlasConfig,
    pub paths: Vec<PathBuf>,
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parses `path` as a manifest, starting from `base_config` and applying the
/// manifest's properties on top of it.
pub fn parse_manifest(path: &Path, base_config: AtlasConfig) -> Result<Manifest> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
    let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();

    let mut config = base_config;
    let mut paths: Vec<PathBuf> = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let describe = |msg: String| format!("manifest line {}: {}", lineno + 1, msg);

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            match key.as_str() {
                "square" => {
                    config.force_square = parse_bool(value)
                        .with_context(|| describe(format!("invalid square {value:?}")))?
                }
                "poweroftwo" => {
                    config.force_power_of_two = parse_bool(value)
                        .with_context(|| describe(format!("invalid poweroftwo {value:?}")))?
                }
                "whitetexture" => {
                    config.include_placeholder = parse_bool(value)
                        .with_context(|| describe(format!("invalid whitetexture {value:?}")))?
                }
                "maxdimension" => {
                    config.max_dimension = value
                        .parse()
                        .with_context(|| describe(format!("invalid maxdimension {value:?}")))?
                }
                "padding" => {
                    config.padding = value
                        .parse()
                        .with_context(|| describe(format!("invalid padding {value:?}")))?
                }
                "cellalign" => {
                    config.cell_align = value
                        .parse()
                        .with_context(|| describe(format!("invalid cellalign {value:?}")))?
                }
                "unusedcolor" => {
                    config.fill_color = parse_color(value)
                        .with_context(|| describe(format!("invalid unusedcolor {value:?}")))?
                }
                other => bail!(describe(format!("unrecognized property {other:?}"))),
            }
        } else if let Some(rest) = line.strip_prefix('-') {
            remove_entries(&mut paths, &base, rest.trim())
                .with_context(|| describe(format!("remove {:?}", rest.trim())))?;
        } else {
            add_entries(&mut paths, &base, line).with_context(|| describe(format!("add {line:?}")))?;
        }
    }

    Ok(Manifest { config, paths })
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}

/// Parses a `#AARRGGBB` color into RGBA bytes.
pub fn parse_color(value: &str) -> Result<[u8; 4]> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 8 {
        bail!("expected #AARRGGBB, got {value:?}");
    }
    let packed =
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid color {value:?}"))?;
    let [a, r, g, b] = packed.to_be_bytes();
    Ok([r, g, b, a])
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn glob_relative(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn add_entries(paths: &mut Vec<PathBuf>, base: &Path, spec: &str) -> Result<()> {
    if spec.contains('*') {
        let matcher = Glob::new(spec)?.compile_matcher();
        for entry in WalkDir::new(base).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
                continue;
            }
            if matcher.is_match(glob_relative(base, entry.path())) {
                push_unique(paths, entry.path().to_path_buf());
            }
        }
        return Ok(());
    }

    let full = base.join(spec);
    if full.is_dir() {
        for entry in WalkDir::new(&full).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_supported_image(entry.path()) {
                push_unique(paths, entry.path().to_path_buf());
            }
        }
        Ok(())
    } else if full.is_file() {
        if !is_supported_image(&full) {
            bail!("unsupported image type: {}", full.display());
        }
        push_unique(paths, full);
        Ok(())
    } else {
        bail!("no such file or directory: {}", full.display());
    }
}

fn remove_entries(paths: &mut Vec<PathBuf>, base: &Path, spec: &str) -> Result<()> {
    if spec.contains('*') {
        let matcher = Glob::new(spec)?.compile_matcher();
        paths.retain(|p| !matcher.is_match(glob_relative(base, p)));
        return Ok(());
    }
    let full = base.join(spec);
    if full.is_dir() {
        paths.retain(|p| !p.starts_with(&full));
    } else {
        paths.retain(|p| *p != full);
    }
    Ok(())
}
