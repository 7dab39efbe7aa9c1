use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{ColoringPageError, Result};

/// Configuration for the coloring page pipeline.
///
/// Every stage parameter is deliberately exposed here instead of being a
/// hidden constant: the closing kernel and the stroke thickness in particular
/// were tuned aggressively in the original and are expected to be revisited.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Maximum canvas size the generated page is fitted into, [width, height].
    #[serde(default = "default_canvas_dimensions")]
    pub canvas_dimensions: [u32; 2],

    /// Odd window side length for adaptive mean thresholding.
    #[serde(default = "default_threshold_window")]
    pub threshold_window: u32,

    /// Offset subtracted from the local neighborhood mean; a pixel becomes
    /// foreground only when it is darker than the mean by more than this.
    #[serde(default = "default_threshold_offset")]
    pub threshold_offset: u8,

    /// Side length of the square structuring element used to close broken
    /// strokes after thresholding. 30 is intentionally large: it merges
    /// nearby outline fragments at the cost of fine detail.
    #[serde(default = "default_closing_kernel_size")]
    pub closing_kernel_size: u32,

    /// Contours with an enclosed area below this are dropped as speckle noise.
    #[serde(default = "default_min_contour_area")]
    pub min_contour_area: f64,

    /// Tolerance for polygon simplification of surviving contours. 30 is an
    /// unusually coarse tolerance and materially changes shape.
    #[serde(default = "default_simplify_tolerance")]
    pub simplify_tolerance: f64,

    /// Thickness used when redrawing simplified contours. The original was
    /// tuned with 1000, far beyond any reasonable pixel width and almost
    /// certainly a unit or parameter-order mismatch; preserved here verbatim
    /// and subject to recalibration.
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: u32,

    /// Side length of the small closing kernel applied after each contour is
    /// redrawn, to smooth stroke junctions.
    #[serde(default = "default_junction_kernel_size")]
    pub junction_kernel_size: u32,

    /// Contours with an enclosed area below this are treated as false holes
    /// and repaired by inpainting.
    #[serde(default = "default_gap_area_threshold")]
    pub gap_area_threshold: f64,

    /// Neighborhood radius used by the gap-repair inpainting.
    #[serde(default = "default_inpaint_radius")]
    pub inpaint_radius: u32,

    /// Initial fill color for the interactive session.
    #[serde(default = "default_fill_color_rgb")]
    pub fill_color_rgb: [u8; 3],
}

fn default_canvas_dimensions() -> [u32; 2] {
    [1024, 768]
}

fn default_threshold_window() -> u32 {
    15
}

fn default_threshold_offset() -> u8 {
    10
}

fn default_closing_kernel_size() -> u32 {
    30
}

fn default_min_contour_area() -> f64 {
    150.0
}

fn default_simplify_tolerance() -> f64 {
    30.0
}

fn default_stroke_thickness() -> u32 {
    1000
}

fn default_junction_kernel_size() -> u32 {
    5
}

fn default_gap_area_threshold() -> f64 {
    50.0
}

fn default_inpaint_radius() -> u32 {
    3
}

fn default_fill_color_rgb() -> [u8; 3] {
    [0, 0, 0]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_dimensions: default_canvas_dimensions(),
            threshold_window: default_threshold_window(),
            threshold_offset: default_threshold_offset(),
            closing_kernel_size: default_closing_kernel_size(),
            min_contour_area: default_min_contour_area(),
            simplify_tolerance: default_simplify_tolerance(),
            stroke_thickness: default_stroke_thickness(),
            junction_kernel_size: default_junction_kernel_size(),
            gap_area_threshold: default_gap_area_threshold(),
            inpaint_radius: default_inpaint_radius(),
            fill_color_rgb: default_fill_color_rgb(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ColoringPageError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ColoringPageError::ConfigLoad {
            source: e,
            path: path.to_path_buf(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.canvas_dimensions[0] == 0 || self.canvas_dimensions[1] == 0 {
            return Err(ColoringPageError::Config(
                "canvas_dimensions must both be > 0".to_string(),
            ));
        }

        if self.threshold_window < 3 || self.threshold_window % 2 == 0 {
            return Err(ColoringPageError::Config(
                "threshold_window must be odd and >= 3".to_string(),
            ));
        }

        if self.closing_kernel_size == 0 {
            return Err(ColoringPageError::Config(
                "closing_kernel_size must be > 0".to_string(),
            ));
        }

        if self.min_contour_area < 0.0 {
            return Err(ColoringPageError::Config(
                "min_contour_area must be >= 0.0".to_string(),
            ));
        }

        if self.simplify_tolerance < 0.0 {
            return Err(ColoringPageError::Config(
                "simplify_tolerance must be >= 0.0".to_string(),
            ));
        }

        if self.stroke_thickness == 0 {
            return Err(ColoringPageError::Config(
                "stroke_thickness must be > 0".to_string(),
            ));
        }

        if self.junction_kernel_size == 0 {
            return Err(ColoringPageError::Config(
                "junction_kernel_size must be > 0".to_string(),
            ));
        }

        if self.gap_area_threshold < 0.0 {
            return Err(ColoringPageError::Config(
                "gap_area_threshold must be >= 0.0".to_string(),
            ));
        }

        if self.inpaint_radius == 0 {
            return Err(ColoringPageError::Config(
                "inpaint_radius must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ColoringPageError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).map_err(ColoringPageError::Io)?;

        Ok(())
    }
}
