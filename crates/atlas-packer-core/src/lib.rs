//! Core library for packing independently sized images into a single texture
//! atlas sheet.
//!
//! - Packing: guillotine free-space subdivision with a corner-search fallback
//! - Sizing: stepwise growth for forced-square sheets; binary search plus a
//!   widening sweep for free-aspect sheets
//! - Compositing: row-by-row blits with nearest-pixel bleed into padding
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use atlas_packer_core::{AtlasConfig, InputImage, pack_images};
//! # fn main() -> anyhow::Result<()> {
//! let img1 = ImageReader::open("a.png")?.decode()?;
//! let img2 = ImageReader::open("b.png")?.decode()?;
//! let inputs = vec![
//!     InputImage { key: "a".into(), image: img1 },
//!     InputImage { key: "b".into(), image: img2 },
//! ];
//! let cfg = AtlasConfig { max_dimension: 1024, ..Default::default() };
//! let out = pack_images(inputs, cfg)?;
//! println!("sheet: {}x{}", out.layout.width, out.layout.height);
//! # Ok(()) }
//! ```

pub mod cancel;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod search;

pub use cancel::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;
pub use search::*;

/// Convenience prelude for common types and functions.
/// Importing `atlas_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder};
    pub use crate::error::{AtlasError, Result};
    pub use crate::model::{AtlasEntry, AtlasLayout, Coordinates, IndexedRectSize, RectSize};
    pub use crate::{
        AtlasOutput, InputImage, PLACEHOLDER_KEY, pack_images, pack_images_with_cancel,
        pack_layout, pack_layout_with_cancel,
    };
}
