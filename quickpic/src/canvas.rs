use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter};

use std::str::FromStr;

use crate::error::{Error, Result};

/// Width of the splash screen canvas
pub const SPLASH_WIDTH: u32 = 1284;
/// Height of the splash screen canvas
pub const SPLASH_HEIGHT: u32 = 2778;

/// The surface a source image gets centered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Canvas {
    Preset(Tool),
    Custom { width: u32, height: u32 },
}

impl Canvas {
    pub fn custom(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidCanvas { width, height });
        }
        Ok(Canvas::Custom { width, height })
    }

    pub fn name(&self) -> &str {
        match self {
            Canvas::Preset(tool) => tool.name(),
            Canvas::Custom { .. } => "Custom",
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Canvas::Preset(tool) => tool.dimensions(),
            Canvas::Custom { width, height } => (*width, *height),
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::Preset(Tool::Splash)
    }
}

impl From<Tool> for Canvas {
    fn from(tool: Tool) -> Self {
        Canvas::Preset(tool)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, EnumCount, EnumIter)]
pub enum Tool {
    Splash,
    Square,
}

impl Tool {
    pub fn len() -> usize {
        Self::COUNT
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    pub fn name(&self) -> &str {
        match self {
            Tool::Splash => "Splash Screen",
            Tool::Square => "Square Image",
        }
    }

    // Both tools ship the same iOS splash size
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Tool::Splash | Tool::Square => (SPLASH_WIDTH, SPLASH_HEIGHT),
        }
    }
}

#[derive(Debug)]
pub struct ParseError(String);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("Invalid tool: ")?;
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseError {}

impl TryFrom<&str> for Tool {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let normalized = s.to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "splash" | "splash-screen" | "splash-image" => Ok(Tool::Splash),
            "square" | "square-image" => Ok(Tool::Square),
            _ => Err(ParseError(s.to_string())),
        }
    }
}

impl FromStr for Tool {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_targets_the_splash_size() {
        assert_eq!(Tool::len(), 2);
        for tool in Tool::iter() {
            assert_eq!(Canvas::from(tool).dimensions(), (1284, 2778));
        }
    }

    #[test]
    fn tool_names_are_normalized() {
        assert_eq!("Splash Screen".parse::<Tool>().unwrap(), Tool::Splash);
        assert_eq!("square_image".parse::<Tool>().unwrap(), Tool::Square);
        assert_eq!("SQUARE".parse::<Tool>().unwrap(), Tool::Square);
        assert!("kindle".parse::<Tool>().is_err());
    }

    #[test]
    fn custom_canvas_rejects_zero_sides() {
        assert!(Canvas::custom(0, 10).is_err());
        assert!(Canvas::custom(10, 0).is_err());
        assert_eq!(Canvas::custom(3, 4).unwrap().dimensions(), (3, 4));
    }
}
