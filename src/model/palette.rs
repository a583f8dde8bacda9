use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Named board colors, in palette order.
///
/// `Black` is the default: unknown or missing color names in a board file
/// fall back to it rather than failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    #[default]
    Black,
    Purple,
    Red,
    Yellow,
    Blue,
    Green,
    Teal,
}

/// The background/foreground/border triplet for one palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStyle {
    pub background: &'static str,
    pub foreground: &'static str,
    pub border: &'static str,
}

/// Error type for palette sampling
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("board has {wanted} columns but the palette only has {available} colors")]
    Exhausted { wanted: usize, available: usize },
}

impl ColorName {
    /// Every palette color, in table order.
    pub const ALL: [ColorName; 7] = [
        ColorName::Black,
        ColorName::Purple,
        ColorName::Red,
        ColorName::Yellow,
        ColorName::Blue,
        ColorName::Green,
        ColorName::Teal,
    ];

    /// The color name as written in board files.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::Black => "black",
            ColorName::Purple => "purple",
            ColorName::Red => "red",
            ColorName::Yellow => "yellow",
            ColorName::Blue => "blue",
            ColorName::Green => "green",
            ColorName::Teal => "teal",
        }
    }

    /// Parse a color name as written in board files.
    pub fn parse(s: &str) -> Option<ColorName> {
        match s {
            "black" => Some(ColorName::Black),
            "purple" => Some(ColorName::Purple),
            "red" => Some(ColorName::Red),
            "yellow" => Some(ColorName::Yellow),
            "blue" => Some(ColorName::Blue),
            "green" => Some(ColorName::Green),
            "teal" => Some(ColorName::Teal),
            _ => None,
        }
    }

    /// The styling triplet used for tiles of this color.
    pub fn style(self) -> ColorStyle {
        match self {
            ColorName::Black => ColorStyle {
                background: "#D9D7D7",
                foreground: "black",
                border: "#414141",
            },
            ColorName::Purple => ColorStyle {
                background: "#fbdbff",
                foreground: "#d30bea",
                border: "#fb87ff",
            },
            ColorName::Red => ColorStyle {
                background: "#ffecee",
                foreground: "#fe3a51",
                border: "#fec9d0",
            },
            ColorName::Yellow => ColorStyle {
                background: "#fef8e7",
                foreground: "#ff9900",
                border: "#f2ce98",
            },
            ColorName::Blue => ColorStyle {
                background: "#eaf8fe",
                foreground: "#29ade8",
                border: "#c6ebfb",
            },
            ColorName::Green => ColorStyle {
                background: "#bafce2",
                foreground: "#00c678",
                border: "#2ce89e",
            },
            ColorName::Teal => ColorStyle {
                background: "#c2eaf0",
                foreground: "#426A70",
                border: "#6b8485",
            },
        }
    }
}

/// Draw `count` distinct colors from the palette, in random order.
///
/// Sampling is without replacement, so a count beyond the palette size is
/// refused rather than truncated or repeated.
pub fn sample_colors<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
) -> Result<Vec<ColorName>, PaletteError> {
    let available = ColorName::ALL.len();
    if count > available {
        return Err(PaletteError::Exhausted {
            wanted: count,
            available,
        });
    }
    Ok(ColorName::ALL.choose_multiple(rng, count).copied().collect())
}
