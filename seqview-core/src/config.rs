//! Layout configuration
//!
//! Every pixel constant used by the layout engine lives here. Values can be
//! loaded from a `seqview.toml` file; missing keys fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub rows: RowConfig,
    #[serde(default)]
    pub feature: FeatureConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub ruler: RulerConfig,
    #[serde(default)]
    pub text: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Pixels per display column
    #[serde(default = "default_column_width")]
    pub column_width: i32,

    /// Space reserved left of every panel for labels
    #[serde(default = "default_left_margin")]
    pub left_margin: i32,

    #[serde(default = "default_right_margin")]
    pub right_margin: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowConfig {
    /// Row capacity of a packed layout
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Gap kept between neighbours sharing a row
    #[serde(default = "default_left_glyph_margin")]
    pub left_glyph_margin: i32,

    #[serde(default = "default_row_spacing")]
    pub row_spacing: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Gaps narrower than this many pixels are merged into one segment
    #[serde(default = "default_min_intron_width")]
    pub min_intron_width: i32,

    #[serde(default = "default_arrow_width")]
    pub arrow_width: i32,

    #[serde(default = "default_segment_height")]
    pub segment_height: i32,

    /// Length of the stub drawn where a remote part joins a segment
    #[serde(default = "default_remote_stub_width")]
    pub remote_stub_width: i32,

    #[serde(default = "default_border_padding")]
    pub border_padding: i32,

    #[serde(default = "default_label_gap")]
    pub label_gap: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Requested number of histogram bins
    #[serde(default = "default_bins")]
    pub bins: usize,

    #[serde(default = "default_min_height")]
    pub min_height: i32,

    #[serde(default = "default_max_height")]
    pub max_height: i32,

    #[serde(default = "default_height_increment")]
    pub height_increment: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerConfig {
    #[serde(default = "default_min_tick_spacing")]
    pub min_tick_spacing: i32,

    #[serde(default = "default_tick_height")]
    pub tick_height: i32,

    /// Target length of the scale bar relative to the panel width
    #[serde(default = "default_scale_bar_fraction")]
    pub scale_bar_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_font_size")]
    pub font_size: i32,
}

fn default_column_width() -> i32 { 10 }
fn default_left_margin() -> i32 { 100 }
fn default_right_margin() -> i32 { 20 }
fn default_max_rows() -> usize { 10 }
fn default_left_glyph_margin() -> i32 { 4 }
fn default_row_spacing() -> i32 { 2 }
fn default_min_intron_width() -> i32 { 5 }
fn default_arrow_width() -> i32 { 4 }
fn default_segment_height() -> i32 { 8 }
fn default_remote_stub_width() -> i32 { 6 }
fn default_border_padding() -> i32 { 2 }
fn default_label_gap() -> i32 { 4 }
fn default_bins() -> usize { 270 }
fn default_min_height() -> i32 { 2 }
fn default_max_height() -> i32 { 16 }
fn default_height_increment() -> i32 { 2 }
fn default_min_tick_spacing() -> i32 { 60 }
fn default_tick_height() -> i32 { 4 }
fn default_scale_bar_fraction() -> f64 { 0.2 }
fn default_font_size() -> i32 { 10 }

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
            left_margin: default_left_margin(),
            right_margin: default_right_margin(),
        }
    }
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            left_glyph_margin: default_left_glyph_margin(),
            row_spacing: default_row_spacing(),
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            min_intron_width: default_min_intron_width(),
            arrow_width: default_arrow_width(),
            segment_height: default_segment_height(),
            remote_stub_width: default_remote_stub_width(),
            border_padding: default_border_padding(),
            label_gap: default_label_gap(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            min_height: default_min_height(),
            max_height: default_max_height(),
            height_increment: default_height_increment(),
        }
    }
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            min_tick_spacing: default_min_tick_spacing(),
            tick_height: default_tick_height(),
            scale_bar_fraction: default_scale_bar_fraction(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            rows: RowConfig::default(),
            feature: FeatureConfig::default(),
            summary: SummaryConfig::default(),
            ruler: RulerConfig::default(),
            text: TextConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading layout configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from("seqview.toml");
                if default_path.exists() {
                    log::info!("Loading layout configuration from: seqview.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::info!("Using default layout configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LayoutConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.rows.max_rows, 10);
        assert_eq!(config.summary.bins, 270);
        assert_eq!(config.canvas.column_width, 10);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = LayoutConfig::default();
        config.rows.max_rows = 4;
        config.feature.min_intron_width = 7;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = LayoutConfig::load_from_file(temp_file.path())?;

        assert_eq!(config, loaded);
        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let config = LayoutConfig::from_toml_str("[rows]\nmax_rows = 3\n")?;
        assert_eq!(config.rows.max_rows, 3);
        assert_eq!(config.rows.row_spacing, 2);
        assert_eq!(config.summary, SummaryConfig::default());
        Ok(())
    }

    #[test]
    fn test_example_toml_generation() {
        let example = LayoutConfig::example_toml();
        assert!(example.contains("[canvas]"));
        assert!(example.contains("[rows]"));
        assert!(example.contains("[summary]"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = LayoutConfig::load_from_file(Path::new("/nonexistent/seqview.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }
}
