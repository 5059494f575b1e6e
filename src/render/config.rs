use std::path::Path;

use serde::Deserialize;

use super::{RenderError, Result};

/// Styling of the rendered plot. Every section has defaults, so a style
/// file only needs the keys it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub figure: FigureConfig,
    pub font: FontConfig,
    /// Stroke width of the series lines, in pixels.
    pub line_width: u32,
    /// Raster resolution of the PNG output (96 = one pixel per SVG unit).
    pub dpi: u32,
    pub x_title: String,
    pub y_title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            font: FontConfig::default(),
            line_width: 2,
            dpi: 144,
            x_title: "m(\u{03C7}\u{0303})".into(),
            y_title: "\u{03C3} [fb]".into(),
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::Style(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| RenderError::Style(format!("{}: {e}", path.display())))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    /// Share of the height given to the ratio panel, when there is one.
    pub ratio_fraction: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 500,
            ratio_fraction: 0.4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub title: f64,
    pub label: f64,
    pub tick: f64,
    pub legend: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            title: 24.0,
            label: 18.0,
            tick: 14.0,
            legend: 15.0,
        }
    }
}
