/// Layout options sent alongside the images

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    #[serde(rename = "vertical")]
    Vertical,
    #[serde(rename = "horizontal")]
    Horizontal,
    /// Two columns, filled row by row
    #[serde(rename = "horizontal_2x")]
    Horizontal2x,
}

impl Direction {
    pub const ALL: [Direction; 3] = [
        Direction::Vertical,
        Direction::Horizontal,
        Direction::Horizontal2x,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Vertical => "Vertical",
            Direction::Horizontal => "Horizontal",
            Direction::Horizontal2x => "Horizontal (2 columns)",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "Left",
            Alignment::Center => "Center",
            Alignment::Right => "Right",
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::Webp];

    /// File extension for downloads
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Webp => "WEBP",
        })
    }
}

/// Options as the merge service expects them
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MergeOptions {
    pub direction: Direction,
    pub spacing: u32,
    pub alignment: Alignment,
    pub target_width: u32,
    pub target_height: u32,
    pub border_color: String,
    pub border_width: u32,
    pub output_format: OutputFormat,
    /// Encoder quality 1-100 (service default 95)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    /// Sharpness factor (service default 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhance: Option<f32>,
}

pub const DEFAULT_SPACING: u32 = 6;
pub const DEFAULT_TARGET_WIDTH: u32 = 550;
pub const DEFAULT_TARGET_HEIGHT: u32 = 800;
pub const DEFAULT_BORDER_COLOR: &str = "#cccccc";
pub const DEFAULT_BORDER_WIDTH: u32 = 1;

/// The option controls as the user left them.
///
/// Numeric fields stay as typed text until `to_options` reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeForm {
    pub direction: Direction,
    pub alignment: Alignment,
    pub output_format: OutputFormat,
    pub spacing: String,
    pub target_width: String,
    pub target_height: String,
    pub border_color: String,
    pub border_width: String,
    /// Blank means "let the service decide"
    pub quality: String,
}

impl Default for MergeForm {
    fn default() -> Self {
        Self {
            direction: Direction::Vertical,
            alignment: Alignment::Left,
            output_format: OutputFormat::Png,
            spacing: DEFAULT_SPACING.to_string(),
            target_width: DEFAULT_TARGET_WIDTH.to_string(),
            target_height: DEFAULT_TARGET_HEIGHT.to_string(),
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            border_width: DEFAULT_BORDER_WIDTH.to_string(),
            quality: String::new(),
        }
    }
}

impl MergeForm {
    /// Read the form the way the page always has: unreadable or zero values
    /// fall back (spacing and border to 0, width to 550, height to 800).
    pub fn to_options(&self) -> MergeOptions {
        MergeOptions {
            direction: self.direction,
            spacing: lenient_int(&self.spacing).unwrap_or(0),
            alignment: self.alignment,
            target_width: lenient_int(&self.target_width).unwrap_or(DEFAULT_TARGET_WIDTH),
            target_height: lenient_int(&self.target_height).unwrap_or(DEFAULT_TARGET_HEIGHT),
            border_color: self.border_color.trim().to_string(),
            border_width: lenient_int(&self.border_width).unwrap_or(0),
            output_format: self.output_format,
            quality: lenient_int(&self.quality).map(|q| q.min(100) as u8),
            enhance: None,
        }
    }

    /// White, zero-width border
    pub fn no_border(&mut self) {
        self.border_color = "#ffffff".to_string();
        self.border_width = "0".to_string();
    }

    /// Vertical merges scale to a width; horizontal ones to a height
    pub fn shows_target_width(&self) -> bool {
        self.direction == Direction::Vertical
    }

    pub fn shows_target_height(&self) -> bool {
        !self.shows_target_width()
    }
}

/// Leading digits of `text` as a positive integer
fn lenient_int(text: &str) -> Option<u32> {
    let text = text.trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    let end = text
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse::<u32>().ok().filter(|&n| n > 0)
}
