use eyre::{Result, WrapErr};
use gpui::Hsla;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Hsla <-> "#rrggbbaa"
pub mod hex_color {
    use eyre::{bail, Result};
    use gpui::{Hsla, Rgba};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Hsla, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_str(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Hsla, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_str(&s).map_err(serde::de::Error::custom)
    }

    pub fn to_hex_str(color: Hsla) -> String {
        let rgba = Rgba::from(color);
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            channel(rgba.r),
            channel(rgba.g),
            channel(rgba.b),
            channel(rgba.a)
        )
    }

    /// Accepts `#rrggbb` and `#rrggbbaa`.
    pub fn parse_hex_str(hex: &str) -> Result<Hsla> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let value = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map(|rgb| (rgb << 8) | 0xff),
            8 => u32::from_str_radix(digits, 16),
            _ => bail!("color {hex:?} must have 6 or 8 hex digits"),
        };
        match value {
            Ok(rgba) => Ok(gpui::rgba(rgba).into()),
            Err(e) => bail!("color {hex:?} is not valid hex: {e}"),
        }
    }
}

/// Outline style.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    #[serde(with = "hex_color")]
    pub color: Hsla,
    pub width: f32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: gpui::blue(),
            width: 1.0,
        }
    }
}

/// Fill style.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    #[serde(with = "hex_color")]
    pub color: Hsla,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: gpui::blue().alpha(0.3),
        }
    }
}

/// Input column roles of an area plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayRole {
    X = 0,
    YLow = 1,
    YHigh = 2,
}

pub const DEFAULT_AREA_TOOLTIP_FORMAT: &str = "%l: %x:(%a, %b)";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaPlotConfig {
    pub visible: bool,
    pub label: String,
    /// Labels indexed by series index, substituted for `%i` in tooltips.
    pub indexed_labels: Vec<String>,
    pub pen: Pen,
    pub brush: Brush,
    pub tooltip_label_format: String,
    /// Name of an 8-bit column flagging valid rows. Empty means all rows
    /// are valid.
    pub valid_point_mask_name: String,
    /// Ignore the X column and plot rows against their index.
    pub use_index_for_x_series: bool,
    pub x_column: Option<String>,
    pub y_low_column: Option<String>,
    pub y_high_column: Option<String>,
}

impl Default for AreaPlotConfig {
    fn default() -> Self {
        Self {
            visible: true,
            label: String::new(),
            indexed_labels: Vec::new(),
            pen: Pen::default(),
            brush: Brush::default(),
            tooltip_label_format: DEFAULT_AREA_TOOLTIP_FORMAT.to_string(),
            valid_point_mask_name: String::new(),
            use_index_for_x_series: false,
            x_column: None,
            y_low_column: None,
            y_high_column: None,
        }
    }
}

impl AreaPlotConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)
            .inspect_err(|e| warn!(error = %e, "rejected area plot configuration"))
            .wrap_err("invalid area plot configuration")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize area plot configuration")
    }

    pub fn column(&self, role: ArrayRole) -> Option<&str> {
        match role {
            ArrayRole::X => self.x_column.as_deref(),
            ArrayRole::YLow => self.y_low_column.as_deref(),
            ArrayRole::YHigh => self.y_high_column.as_deref(),
        }
    }

    pub fn set_column(&mut self, role: ArrayRole, name: Option<String>) {
        match role {
            ArrayRole::X => self.x_column = name,
            ArrayRole::YLow => self.y_low_column = name,
            ArrayRole::YHigh => self.y_high_column = name,
        }
    }
}
