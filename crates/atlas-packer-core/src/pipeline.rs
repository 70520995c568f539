use image::{DynamicImage, Rgba, RgbaImage};
use tracing::instrument;

use crate::cancel::CancelToken;
use crate::compositing::{BlitFrame, composite};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::model::{AtlasEntry, AtlasLayout, Coordinates, IndexedRectSize, RectSize};
use crate::packer::rank;
use crate::search::{SheetFit, align_up_u32, fit_sheet, next_pow2};

/// Key under which the optional solid-white placeholder image is placed.
pub const PLACEHOLDER_KEY: &str = "white";

/// In-memory image to pack (key + decoded image).
pub struct InputImage {
    pub key: String,
    pub image: DynamicImage,
}

/// Output of a full packing run: the atlas map and the composited sheet.
pub struct AtlasOutput {
    pub layout: AtlasLayout,
    pub rgba: RgbaImage,
}

#[instrument(skip_all)]
/// Packs `inputs` into a single atlas sheet using configuration `cfg` and
/// returns the placement map plus the composited RGBA sheet.
pub fn pack_images(inputs: Vec<InputImage>, cfg: AtlasConfig) -> Result<AtlasOutput> {
    pack_images_with_cancel(inputs, cfg, &CancelToken::new())
}

/// Like [`pack_images`], polling `cancel` between per-image preparation
/// steps and between sizing-search iterations.
#[instrument(skip_all)]
pub fn pack_images_with_cancel(
    inputs: Vec<InputImage>,
    cfg: AtlasConfig,
    cancel: &CancelToken,
) -> Result<AtlasOutput> {
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(AtlasError::Empty);
    }

    let mut keys: Vec<String> = Vec::with_capacity(inputs.len() + 1);
    let mut images: Vec<RgbaImage> = Vec::with_capacity(inputs.len() + 1);
    for input in inputs {
        cancel.check()?;
        images.push(input.image.to_rgba8());
        keys.push(input.key);
    }
    if cfg.include_placeholder {
        let cell = cfg.cell_align.max(1);
        keys.push(PLACEHOLDER_KEY.to_string());
        images.push(RgbaImage::from_pixel(cell, cell, Rgba([255, 255, 255, 255])));
    }

    let sizes: Vec<RectSize> = images
        .iter()
        .map(|img| {
            let (w, h) = img.dimensions();
            RectSize::new(w, h)
        })
        .collect();
    validate_sizes(&keys, &sizes)?;

    let ranked = rank(&sizes);
    let fit = fit_sheet(&ranked, &cfg, cancel)?;
    let (layout, frames) = finalize(&keys, &sizes, &ranked, &fit, &cfg);

    cancel.check()?;
    let sheet = composite(
        &images,
        &frames,
        layout.width,
        layout.height,
        Rgba(cfg.fill_color),
        cfg.padding,
    );
    Ok(AtlasOutput {
        layout,
        rgba: sheet,
    })
}

#[instrument(skip_all)]
/// Packs sizes only, without pixel data. Inputs are `(key, width, height)`.
/// Placeholder and validation rules match [`pack_images`].
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: AtlasConfig,
) -> Result<AtlasLayout> {
    pack_layout_with_cancel(inputs, cfg, &CancelToken::new())
}

/// Like [`pack_layout`], polling `cancel` between sizing-search iterations.
pub fn pack_layout_with_cancel<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: AtlasConfig,
    cancel: &CancelToken,
) -> Result<AtlasLayout> {
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(AtlasError::Empty);
    }

    let mut keys: Vec<String> = Vec::with_capacity(inputs.len() + 1);
    let mut sizes: Vec<RectSize> = Vec::with_capacity(inputs.len() + 1);
    for (key, w, h) in inputs {
        keys.push(key.into());
        sizes.push(RectSize::new(w, h));
    }
    if cfg.include_placeholder {
        let cell = cfg.cell_align.max(1);
        keys.push(PLACEHOLDER_KEY.to_string());
        sizes.push(RectSize::new(cell, cell));
    }
    validate_sizes(&keys, &sizes)?;

    let ranked = rank(&sizes);
    let fit = fit_sheet(&ranked, &cfg, cancel)?;
    let (layout, _) = finalize(&keys, &sizes, &ranked, &fit, &cfg);
    Ok(layout)
}

fn validate_sizes(keys: &[String], sizes: &[RectSize]) -> Result<()> {
    for (key, size) in keys.iter().zip(sizes) {
        if size.width == 0 || size.height == 0 {
            return Err(AtlasError::InvalidInput(format!(
                "image {key:?} has zero dimension ({}x{})",
                size.width, size.height
            )));
        }
    }
    Ok(())
}

/// Converts the padded search placements back to content rectangles, derives
/// the tightest sheet dimensions the configuration allows, and rebuilds the
/// map in the caller's input order.
fn finalize(
    keys: &[String],
    sizes: &[RectSize],
    ranked: &[IndexedRectSize],
    fit: &SheetFit,
    cfg: &AtlasConfig,
) -> (AtlasLayout, Vec<BlitFrame>) {
    let mut frames: Vec<BlitFrame> = Vec::with_capacity(ranked.len());
    let mut far_right: i64 = 0;
    let mut far_bottom: i64 = 0;
    for (item, padded) in ranked.iter().zip(&fit.placements) {
        let size = sizes[item.index];
        let content = Coordinates::new(
            padded.left,
            padded.left + size.width as i64,
            padded.top,
            padded.top + size.height as i64,
        );
        far_right = far_right.max(content.right);
        far_bottom = far_bottom.max(content.bottom);
        frames.push(BlitFrame {
            image: item.index,
            content,
            padded: *padded,
        });
    }

    let mut width = far_right.max(0) as u32;
    let mut height = far_bottom.max(0) as u32;
    if cfg.force_power_of_two {
        width = next_pow2(width);
        height = next_pow2(height);
    } else {
        let cell = cfg.cell_align.max(1);
        width = align_up_u32(width, cell);
        height = align_up_u32(height, cell);
    }
    if cfg.force_square {
        let side = width.max(height);
        width = side;
        height = side;
    }

    let mut indexed: Vec<(usize, AtlasEntry)> = frames
        .iter()
        .map(|f| {
            (
                f.image,
                AtlasEntry {
                    key: keys[f.image].clone(),
                    rect: f.content,
                },
            )
        })
        .collect();
    indexed.sort_by_key(|(i, _)| *i);
    let entries = indexed.into_iter().map(|(_, e)| e).collect();

    (
        AtlasLayout {
            width,
            height,
            entries,
        },
        frames,
    )
}
