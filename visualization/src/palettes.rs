//! Registry of named color sequences for speed bins
//!
//! Palettes are plain data: a name and an ordered list of colors, from the
//! lightest wind to the strongest. Unknown names fall back to
//! [`DEFAULT_PALETTE`] with a warning rather than failing the render.

use crate::errors::{Result, VisualizationError};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Palette used when none, or an unknown one, is requested
pub const DEFAULT_PALETTE: Palette = Palette::Plasma;

/// Named sequential palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Plasma,
    Viridis,
    Inferno,
    Magma,
    Cividis,
    Turbo,
    Blues,
    Greens,
    Greys,
    Oranges,
    Purples,
    Reds,
    YlGnBu,
    YlOrRd,
}

impl Palette {
    pub const ALL: [Palette; 14] = [
        Palette::Plasma,
        Palette::Viridis,
        Palette::Inferno,
        Palette::Magma,
        Palette::Cividis,
        Palette::Turbo,
        Palette::Blues,
        Palette::Greens,
        Palette::Greys,
        Palette::Oranges,
        Palette::Purples,
        Palette::Reds,
        Palette::YlGnBu,
        Palette::YlOrRd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Plasma => "Plasma",
            Palette::Viridis => "Viridis",
            Palette::Inferno => "Inferno",
            Palette::Magma => "Magma",
            Palette::Cividis => "Cividis",
            Palette::Turbo => "Turbo",
            Palette::Blues => "Blues",
            Palette::Greens => "Greens",
            Palette::Greys => "Greys",
            Palette::Oranges => "Oranges",
            Palette::Purples => "Purples",
            Palette::Reds => "Reds",
            Palette::YlGnBu => "YlGnBu",
            Palette::YlOrRd => "YlOrRd",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
    }

    pub fn hex_colors(self) -> &'static [&'static str] {
        match self {
            Palette::Plasma => &[
                "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953",
                "#fb9f3a", "#fdca26", "#f0f921",
            ],
            Palette::Viridis => &[
                "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779",
                "#6ece58", "#b5de2b", "#fde725",
            ],
            Palette::Inferno => &[
                "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925",
                "#fb9b06", "#f7d13d", "#fcffa4",
            ],
            Palette::Magma => &[
                "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f", "#cd4071", "#f1605d",
                "#fd9668", "#feca8d", "#fcfdbf",
            ],
            Palette::Cividis => &[
                "#00224e", "#123570", "#3b496c", "#575d6d", "#707173", "#8a8678", "#a59c74",
                "#c3b369", "#e1cc55", "#fee838",
            ],
            Palette::Turbo => &[
                "#30123b", "#4145ab", "#4675ed", "#39a2fc", "#1bcfd4", "#24eca6", "#61fc6c",
                "#a4fc3b", "#d1e834", "#f3c63a", "#fe9b2d", "#f36315", "#d93806", "#b11901",
                "#7a0402",
            ],
            Palette::Blues => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
            Palette::Greens => &[
                "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45",
                "#006d2c", "#00441b",
            ],
            Palette::Greys => &[
                "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252",
                "#252525", "#000000",
            ],
            Palette::Oranges => &[
                "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801",
                "#a63603", "#7f2704",
            ],
            Palette::Purples => &[
                "#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3",
                "#54278f", "#3f007d",
            ],
            Palette::Reds => &[
                "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d",
                "#a50f15", "#67000d",
            ],
            Palette::YlGnBu => &[
                "#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8",
                "#253494", "#081d58",
            ],
            Palette::YlOrRd => &[
                "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c",
                "#bd0026", "#800026",
            ],
        }
    }

    pub fn colors(self) -> Vec<RGBColor> {
        self.hex_colors()
            .iter()
            .filter_map(|hex| parse_color(hex).ok())
            .collect()
    }
}

/// Requested color sequence: a palette name or explicit colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Named(String),
    Custom(Vec<String>),
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Named(DEFAULT_PALETTE.name().to_string())
    }
}

impl ColorSpec {
    /// Resolve to concrete colors.
    ///
    /// An unknown palette name is a warning and yields the default palette;
    /// a malformed explicit color is a configuration error.
    pub fn resolve(&self) -> Result<Vec<RGBColor>> {
        match self {
            ColorSpec::Named(name) => match Palette::from_name(name) {
                Some(palette) => Ok(palette.colors()),
                None => {
                    tracing::warn!(
                        "{} is not a valid color sequence, using {}",
                        name,
                        DEFAULT_PALETTE.name()
                    );
                    Ok(DEFAULT_PALETTE.colors())
                }
            },
            ColorSpec::Custom(colors) if colors.is_empty() => Err(VisualizationError::ConfigError {
                message: "custom color list is empty".to_string(),
            }),
            ColorSpec::Custom(colors) => colors.iter().map(|c| parse_color(c)).collect(),
        }
    }
}

/// Parse `#rrggbb`, `#rgb` or `rgb(r, g, b)`
pub fn parse_color(text: &str) -> Result<RGBColor> {
    let invalid = || VisualizationError::ConfigError {
        message: format!("invalid color '{}'", text),
    };
    let trimmed = text.trim();

    if let Some(hex) = trimmed.strip_prefix('#') {
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let expanded: String = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        return Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?));
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let channels: Vec<u8> = body
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<_>>()?;
        if let [r, g, b] = channels[..] {
            return Ok(RGBColor(r, g, b));
        }
    }

    Err(invalid())
}

/// Color of each speed bin, in bin order.
///
/// The sequence is reversed first when `reversed` is set; when there are more
/// bins than colors the sequence repeats.
pub fn assign_colors(colors: &[RGBColor], bins: usize, reversed: bool) -> Vec<RGBColor> {
    if colors.is_empty() {
        return Vec::new();
    }
    if bins > colors.len() {
        tracing::warn!(
            bins,
            colors = colors.len(),
            "number of bins exceeds number of colors, some colors will repeat"
        );
    }

    let mut sequence = colors.to_vec();
    if reversed {
        sequence.reverse();
    }
    (0..bins).map(|i| sequence[i % sequence.len()]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lookup_is_case_insensitive() {
        assert_eq!(Palette::from_name("plasma"), Some(Palette::Plasma));
        assert_eq!(Palette::from_name(" YLGNBU "), Some(Palette::YlGnBu));
        assert_eq!(Palette::from_name("Rainbow"), None);
    }

    #[test]
    fn test_every_palette_parses() {
        for palette in Palette::ALL {
            assert_eq!(palette.colors().len(), palette.hex_colors().len());
            assert!(palette.colors().len() >= 9);
        }
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#ff8000").unwrap(), RGBColor(255, 128, 0));
        assert_eq!(parse_color("#f80").unwrap(), RGBColor(255, 136, 0));
        assert_eq!(parse_color("rgb(1, 2, 3)").unwrap(), RGBColor(1, 2, 3));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("rgb(1,2)").is_err());
        assert!(parse_color("rgb(1,2,300)").is_err());
        assert!(parse_color("teal").is_err());
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let colors = ColorSpec::Named("NoSuchPalette".to_string()).resolve().unwrap();
        assert_eq!(colors, DEFAULT_PALETTE.colors());
    }

    #[test]
    fn test_custom_colors() {
        let custom = ColorSpec::Custom(vec!["#000000".to_string(), "rgb(255,255,255)".to_string()]);
        assert_eq!(
            custom.resolve().unwrap(),
            vec![RGBColor(0, 0, 0), RGBColor(255, 255, 255)]
        );
        assert!(ColorSpec::Custom(vec!["nope".to_string()]).resolve().is_err());
        assert!(ColorSpec::Custom(Vec::new()).resolve().is_err());
    }

    #[test]
    fn test_assign_colors_reverses_and_repeats() {
        let colors = vec![RGBColor(1, 0, 0), RGBColor(2, 0, 0), RGBColor(3, 0, 0)];
        assert_eq!(
            assign_colors(&colors, 2, true),
            vec![RGBColor(3, 0, 0), RGBColor(2, 0, 0)]
        );
        assert_eq!(
            assign_colors(&colors, 5, false),
            vec![
                RGBColor(1, 0, 0),
                RGBColor(2, 0, 0),
                RGBColor(3, 0, 0),
                RGBColor(1, 0, 0),
                RGBColor(2, 0, 0)
            ]
        );
        assert!(assign_colors(&[], 3, false).is_empty());
    }
}
