use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::slate()
    }
}

impl Theme {
    /// Dark blue-grey theme.
    ///
    pub fn slate() -> Self {
        Theme {
            name: "slate".to_string(),
            primary: ColorSpec::rgb(96, 165, 250),
            accent: ColorSpec::rgb(244, 114, 182),
            banner: ColorSpec::rgb(96, 165, 250),
            text: ColorSpec::rgb(226, 232, 240),
            text_muted: ColorSpec::rgb(100, 116, 139),
            success: ColorSpec::rgb(74, 222, 128),
            warning: ColorSpec::rgb(250, 204, 21),
            error: ColorSpec::rgb(248, 113, 113),
            border_active: ColorSpec::rgb(96, 165, 250),
            border_normal: ColorSpec::rgb(71, 85, 105),
            highlight_bg: ColorSpec::rgb(30, 41, 59),
            highlight_fg: ColorSpec::rgb(248, 250, 252),
        }
    }

    /// Light theme for bright terminals.
    ///
    pub fn paper() -> Self {
        Theme {
            name: "paper".to_string(),
            primary: ColorSpec::rgb(37, 99, 235),
            accent: ColorSpec::rgb(190, 24, 93),
            banner: ColorSpec::rgb(37, 99, 235),
            text: ColorSpec::rgb(30, 41, 59),
            text_muted: ColorSpec::rgb(100, 116, 139),
            success: ColorSpec::rgb(21, 128, 61),
            warning: ColorSpec::rgb(161, 98, 7),
            error: ColorSpec::rgb(185, 28, 28),
            border_active: ColorSpec::rgb(37, 99, 235),
            border_normal: ColorSpec::rgb(203, 213, 225),
            highlight_bg: ColorSpec::rgb(219, 234, 254),
            highlight_fg: ColorSpec::rgb(15, 23, 42),
        }
    }

    pub fn high_contrast() -> Self {
        Theme {
            name: "high-contrast".to_string(),
            primary: ColorSpec::rgb(255, 255, 0),
            accent: ColorSpec::rgb(0, 255, 255),
            banner: ColorSpec::rgb(255, 255, 255),
            text: ColorSpec::rgb(255, 255, 255),
            text_muted: ColorSpec::rgb(192, 192, 192),
            success: ColorSpec::rgb(0, 255, 0),
            warning: ColorSpec::rgb(255, 165, 0),
            error: ColorSpec::rgb(255, 0, 0),
            border_active: ColorSpec::rgb(255, 255, 0),
            border_normal: ColorSpec::rgb(255, 255, 255),
            highlight_bg: ColorSpec::rgb(0, 0, 255),
            highlight_fg: ColorSpec::rgb(255, 255, 255),
        }
    }

    /// Look up a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "slate" => Some(Theme::slate()),
            "paper" => Some(Theme::paper()),
            "high-contrast" => Some(Theme::high_contrast()),
            _ => None,
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec![
            "slate".to_string(),
            "paper".to_string(),
            "high-contrast".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_available_theme_resolves() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::from_name(&name).unwrap().name, name);
        }
        assert!(Theme::from_name("neon").is_none());
    }

    #[test]
    fn test_color_spec_to_color() {
        assert_eq!(ColorSpec::rgb(1, 2, 3).to_color(), Color::Rgb(1, 2, 3));
    }
}
