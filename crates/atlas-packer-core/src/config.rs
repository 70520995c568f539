use serde::{Deserialize, Serialize};

/// Packing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Upper bound on sheet width and height, in pixels. Values above 65535
    /// are clamped before the sizing search so area arithmetic stays in range.
    pub max_dimension: u32,
    /// Margin, in pixels, kept between placed rectangles and between a
    /// rectangle and the packing boundary used during the search.
    #[serde(default)]
    pub padding: u32,
    /// Granularity that placed right/bottom edges are rounded up to. Matches
    /// block-compressed texture cells; 4 by default.
    #[serde(default = "default_cell_align")]
    pub cell_align: u32,
    /// Force the final sheet to be square.
    #[serde(default)]
    pub force_square: bool,
    /// Force the final sheet dimensions to powers of two.
    #[serde(default)]
    pub force_power_of_two: bool,
    /// Append a solid-white `cell_align` x `cell_align` image under
    /// [`crate::PLACEHOLDER_KEY`].
    #[serde(default)]
    pub include_placeholder: bool,
    /// RGBA fill for sheet area not covered by any image or bleed.
    #[serde(default)]
    pub fill_color: [u8; 4],
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_dimension: 4096,
            padding: 0,
            cell_align: default_cell_align(),
            force_square: false,
            force_power_of_two: false,
            include_placeholder: false,
            fill_color: [0, 0, 0, 0],
        }
    }
}

fn default_cell_align() -> u32 {
    4
}

impl AtlasConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.max_dimension == 0 {
            return Err(AtlasError::InvalidConfig(
                "max_dimension must be at least 1".into(),
            ));
        }
        if self.cell_align == 0 {
            return Err(AtlasError::InvalidConfig(
                "cell_align must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn max_dimension(mut self, v: u32) -> Self {
        self.cfg.max_dimension = v;
        self
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn cell_align(mut self, v: u32) -> Self {
        self.cfg.cell_align = v;
        self
    }
    pub fn square(mut self, v: bool) -> Self {
        self.cfg.force_square = v;
        self
    }
    pub fn pow2(mut self, v: bool) -> Self {
        self.cfg.force_power_of_two = v;
        self
    }
    pub fn placeholder(mut self, v: bool) -> Self {
        self.cfg.include_placeholder = v;
        self
    }
    pub fn fill_color(mut self, v: [u8; 4]) -> Self {
        self.cfg.fill_color = v;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}
