//! Terminal theme and color definitions

use crate::preferences::{DisplayMode, Preferences, VisualStyle};
use crossterm::style::Color;

/// Theme colors for the interactive shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Color for the prompt
    pub prompt: Color,
    /// Color for regular output text
    pub text: Color,
    /// Color for headings
    pub heading: Color,
    /// Color for highlighted names and entry labels
    pub accent: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for dim/secondary info
    pub dim: Color,
    /// Color for success messages
    pub success: Color,
    /// Color for the banner/title
    pub title: Color,
}

impl Theme {
    /// Palette for a display mode and visual style
    pub fn for_preferences(preferences: &Preferences) -> Self {
        let (text, dim) = match preferences.mode {
            DisplayMode::Dark => (Color::White, Color::DarkGrey),
            DisplayMode::Light => (Color::Black, Color::Grey),
        };

        let (prompt, accent, title) = match preferences.style {
            VisualStyle::Default => (Color::Green, Color::Green, Color::Magenta),
            VisualStyle::Cyberpunk => (
                Color::Rgb { r: 0xff, g: 0x00, b: 0xa0 },
                Color::Rgb { r: 0x00, g: 0xf0, b: 0xff },
                Color::Rgb { r: 0xff, g: 0x00, b: 0xa0 },
            ),
            VisualStyle::Terminal => (
                Color::Rgb { r: 0x00, g: 0xff, b: 0x9d },
                Color::Rgb { r: 0x00, g: 0xff, b: 0x9d },
                Color::Rgb { r: 0x00, g: 0xff, b: 0x9d },
            ),
            VisualStyle::Space => (
                Color::Rgb { r: 0x6e, g: 0x56, b: 0xcf },
                Color::Rgb { r: 0xa5, g: 0x96, b: 0xf0 },
                Color::Rgb { r: 0x6e, g: 0x56, b: 0xcf },
            ),
        };

        Self {
            prompt,
            text,
            heading: Color::Yellow,
            accent,
            error: Color::Red,
            dim,
            success: Color::Green,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_changes_text_color() {
        let dark = Theme::for_preferences(&Preferences::default());
        let light = Theme::for_preferences(&Preferences {
            mode: DisplayMode::Light,
            ..Preferences::default()
        });
        assert_eq!(dark.text, Color::White);
        assert_eq!(light.text, Color::Black);
        assert_eq!(dark.accent, light.accent);
    }

    #[test]
    fn test_styles_have_distinct_prompts() {
        let prompts: Vec<Color> = VisualStyle::ALL
            .iter()
            .map(|style| {
                Theme::for_preferences(&Preferences {
                    style: *style,
                    ..Preferences::default()
                })
                .prompt
            })
            .collect();
        for (i, prompt) in prompts.iter().enumerate() {
            assert!(!prompts[i + 1..].contains(prompt));
        }
    }
}
