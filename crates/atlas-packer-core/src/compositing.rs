//! Sheet assembly: blits placed images into the output buffer and bleeds
//! their edge pixels into the surrounding padding, so bilinear sampling at
//! region seams never reads the fill color.

use image::{Rgba, RgbaImage};

use crate::model::Coordinates;

/// One compositing job: a source image index, the content rectangle it was
/// assigned, and the padded footprint reserved for it during packing.
#[derive(Debug, Clone, Copy)]
pub struct BlitFrame {
    pub image: usize,
    pub content: Coordinates,
    pub padded: Coordinates,
}

/// Copies every frame into a fresh `sheet_w` x `sheet_h` buffer initialized
/// to `fill`, then extends each frame's outermost rows and columns into its
/// padding band on all four sides.
pub fn composite(
    images: &[RgbaImage],
    frames: &[BlitFrame],
    sheet_w: u32,
    sheet_h: u32,
    fill: Rgba<u8>,
    padding: u32,
) -> RgbaImage {
    let mut sheet = RgbaImage::from_pixel(sheet_w, sheet_h, fill);
    for frame in frames {
        blit_with_bleed(&images[frame.image], &mut sheet, frame, padding);
    }
    sheet
}

fn blit_with_bleed(src: &RgbaImage, sheet: &mut RgbaImage, frame: &BlitFrame, padding: u32) {
    let (sheet_w, sheet_h) = sheet.dimensions();
    let (src_w, src_h) = src.dimensions();
    let Coordinates {
        left,
        right,
        top,
        bottom,
    } = frame.content;
    let padding = padding as i64;

    // Band extents. Right and bottom also cover the cell-alignment slack
    // inside the padded footprint, minus the share reserved for a neighbor's
    // own margin; left and top get exactly the margin when it is in bounds.
    let mut right_band = frame.padded.right - right - padding;
    if right + right_band > sheet_w as i64 {
        right_band = sheet_w as i64 - right;
    }
    let right_band = right_band.max(0);
    let mut bottom_band = frame.padded.bottom - bottom - padding;
    if bottom + bottom_band > sheet_h as i64 {
        bottom_band = sheet_h as i64 - bottom;
    }
    let bottom_band = bottom_band.max(0);
    let left_band = if left - padding >= 0 { padding } else { 0 };
    let top_band = if top - padding >= 0 { padding } else { 0 };

    // Rows, with horizontal bleed off each end.
    for y in 0..src_h.min((bottom - top).max(0) as u32) {
        let dy = (top + y as i64) as u32;
        for x in 0..src_w.min((right - left).max(0) as u32) {
            sheet.put_pixel((left + x as i64) as u32, dy, *src.get_pixel(x, y));
        }
        let edge = *src.get_pixel(src_w - 1, y);
        for x in 0..right_band {
            sheet.put_pixel((right + x) as u32, dy, edge);
        }
        let edge = *src.get_pixel(0, y);
        for x in 0..left_band {
            sheet.put_pixel((left - 1 - x) as u32, dy, edge);
        }
    }

    // Bottom band: replicate the last written row, side bands included.
    for y in 0..bottom_band {
        let dy = (bottom + y) as u32;
        for x in (left - left_band)..(right + right_band) {
            let px = *sheet.get_pixel(x as u32, (bottom - 1) as u32);
            sheet.put_pixel(x as u32, dy, px);
        }
    }
    // Top band: replicate the first row upward.
    for y in 0..top_band {
        let dy = (top - 1 - y) as u32;
        for x in (left - left_band)..(right + right_band) {
            let px = *sheet.get_pixel(x as u32, top as u32);
            sheet.put_pixel(x as u32, dy, px);
        }
    }
}
