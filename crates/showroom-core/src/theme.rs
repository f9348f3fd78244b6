//! Light and dark theme

use crate::manifest::{parse_hex_color, ManifestError, ThemeSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_spec(spec: &ThemeSpec) -> Self {
        if spec.start_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(&mut self) {
        *self = match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Scene background for this theme as sRGB `[r, g, b]`
    pub fn background(&self, spec: &ThemeSpec) -> Result<[f32; 3], ManifestError> {
        match self {
            Theme::Light => parse_hex_color(&spec.light_background),
            Theme::Dark => parse_hex_color(&spec.dark_background),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut theme = Theme::from_spec(&ThemeSpec::default());
        assert_eq!(theme, Theme::Light);
        theme.toggle();
        assert!(theme.is_dark());
        theme.toggle();
        assert!(!theme.is_dark());
    }

    #[test]
    fn test_background() {
        let spec = ThemeSpec::default();
        assert_eq!(Theme::Light.background(&spec).unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(Theme::Dark.background(&spec).unwrap(), [0.0, 0.0, 0.0]);

        let spec = ThemeSpec {
            start_dark: true,
            ..ThemeSpec::default()
        };
        assert_eq!(Theme::from_spec(&spec), Theme::Dark);
    }
}
