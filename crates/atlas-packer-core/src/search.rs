//! Candidate sheet sizing: drives repeated packing attempts over candidate
//! dimensions until the smallest workable sheet is found.

use tracing::debug;

use crate::cancel::CancelToken;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::model::{Coordinates, IndexedRectSize};
use crate::packer::try_pack;

/// Result of a successful sizing search: the padded placements (in ranked
/// order) and the candidate dimensions they were packed against.
#[derive(Debug, Clone)]
pub struct SheetFit {
    pub placements: Vec<Coordinates>,
    pub width: u32,
    pub height: u32,
}

/// Sheet dimensions above this bound risk overflowing area arithmetic.
pub(crate) const MAX_SHEET_DIMENSION: u32 = 65_535;

pub(crate) fn next_pow2(mut v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    v -= 1;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v + 1
}

pub(crate) fn align_up_u32(v: u32, align: u32) -> u32 {
    v.div_ceil(align) * align
}

/// Searches candidate dimensions per `cfg` and returns the best fit.
///
/// Individual attempt failures are internal; only the final outcome is
/// surfaced, carrying the best fit count seen across all failed attempts.
pub fn fit_sheet(
    ranked: &[IndexedRectSize],
    cfg: &AtlasConfig,
    cancel: &CancelToken,
) -> Result<SheetFit> {
    let max_dimension = cfg.max_dimension.min(MAX_SHEET_DIMENSION);
    let total_area: u64 = ranked.iter().map(|r| r.size.area()).sum();
    let widest = ranked.iter().map(|r| r.size.width).max().unwrap_or(0);
    let tallest = ranked.iter().map(|r| r.size.height).max().unwrap_or(0);

    if cfg.force_square {
        tighten_square(
            ranked,
            widest.max(tallest),
            max_dimension,
            total_area,
            cfg,
            cancel,
        )
    } else {
        tighten_optimal(
            ranked,
            widest,
            tallest,
            max_dimension,
            total_area,
            cfg,
            cancel,
        )
    }
}

fn out_of_space(ranked: &[IndexedRectSize], fit: usize, max_dimension: u32) -> AtlasError {
    AtlasError::OutOfSpace {
        attempted: ranked.len(),
        fit,
        max_dimension,
    }
}

/// Forced-square mode: start the square at its lower bound and grow it until
/// everything fits or the dimension cap is passed.
fn tighten_square(
    ranked: &[IndexedRectSize],
    longest_side: u32,
    max_dimension: u32,
    total_area: u64,
    cfg: &AtlasConfig,
    cancel: &CancelToken,
) -> Result<SheetFit> {
    // A square can hold the images only if its side covers the square root
    // of the total area and the longest single side.
    let mut dimension = ((total_area as f64).sqrt().ceil() as u32).max(longest_side);
    if cfg.force_power_of_two {
        dimension = next_pow2(dimension);
    }

    let mut best_fit = 0usize;
    while dimension <= max_dimension {
        cancel.check()?;
        match try_pack(ranked, dimension, dimension, cfg.padding, cfg.cell_align) {
            Ok(placements) => {
                debug!(dimension, "square candidate packed");
                return Ok(SheetFit {
                    placements,
                    width: dimension,
                    height: dimension,
                });
            }
            Err(f) => best_fit = best_fit.max(f.fit_count),
        }
        dimension = if cfg.force_power_of_two {
            dimension * 2
        } else {
            dimension + cfg.cell_align.max(1)
        };
    }
    Err(out_of_space(ranked, best_fit, max_dimension))
}

/// Free-aspect mode: binary-search the smallest width that packs at full
/// height, then sweep wider candidates, shrinking the height while the total
/// area keeps improving.
fn tighten_optimal(
    ranked: &[IndexedRectSize],
    widest: u32,
    tallest: u32,
    max_dimension: u32,
    total_area: u64,
    cfg: &AtlasConfig,
    cancel: &CancelToken,
) -> Result<SheetFit> {
    let cell = cfg.cell_align.max(1);
    let mut best_fit = 0usize;

    // Candidate widths live on the cell grid.
    let max_rounded = max_dimension - max_dimension % cell;
    if max_rounded == 0 {
        return Err(out_of_space(ranked, 0, max_dimension));
    }

    // Lower bound: the widest single image, or the width the total area
    // forces once the height is capped, whichever is larger.
    let width_due_to_area =
        u32::try_from(total_area.div_ceil(max_rounded as u64)).unwrap_or(u32::MAX);
    let mut min_width = widest.max(width_due_to_area);
    if cfg.force_power_of_two {
        min_width = next_pow2(min_width);
    }
    let min_width = align_up_u32(min_width, cell);

    // Binary search for the thinnest sheet that packs at height max_dimension.
    let mut best: Option<(u32, Vec<Coordinates>)> = None;
    let mut lower = min_width as i64;
    let mut upper = max_rounded as i64;
    while lower <= upper {
        cancel.check()?;
        let test_width = ((lower + upper) / 2) as u32;
        match try_pack(ranked, test_width, max_dimension, cfg.padding, cfg.cell_align) {
            Ok(placements) => {
                best = Some((test_width, placements));
                upper = test_width as i64 - cell as i64;
            }
            Err(f) => {
                best_fit = best_fit.max(f.fit_count);
                lower = test_width as i64 + cell as i64;
            }
        }
    }
    let Some((mut width, mut placements)) = best else {
        return Err(out_of_space(ranked, best_fit, max_dimension));
    };

    let mut height = placements
        .iter()
        .map(|c| c.bottom.max(0) as u32)
        .max()
        .unwrap_or(0);
    if cfg.force_power_of_two {
        height = next_pow2(height);
    }
    debug!(width, height, "thinnest candidate found");

    // Sweep wider candidates. Each width is given the height that would beat
    // the best area so far, then the height is shrunk until packing fails.
    // Once the implied height drops below the tallest single image, no wider
    // sheet can improve the area and the sweep stops.
    let mut result_area = width as u64 * height as u64;
    let mut test_width = width;
    while test_width <= max_rounded && result_area / test_width as u64 >= tallest as u64 {
        let mut test_height = (result_area / test_width as u64) as u32;
        while test_height > 0 {
            cancel.check()?;
            match try_pack(ranked, test_width, test_height, cfg.padding, cfg.cell_align) {
                Ok(p) => {
                    width = test_width;
                    height = test_height;
                    placements = p;
                    result_area = width as u64 * height as u64;
                    test_height = if cfg.force_power_of_two {
                        test_height / 2
                    } else {
                        test_height.saturating_sub(cell)
                    };
                }
                Err(f) => {
                    best_fit = best_fit.max(f.fit_count);
                    break;
                }
            }
        }
        test_width = if cfg.force_power_of_two {
            test_width.saturating_mul(2)
        } else {
            test_width + cell
        };
    }

    Ok(SheetFit {
        placements,
        width,
        height,
    })
}
