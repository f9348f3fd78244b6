//! Shared resources for viewer state, selection and UI layout

use bevy::prelude::*;
use showroom_core::{DescriptionCatalog, PresetRing, SceneManifest, SelectedExhibit, Theme};

/// The scene manifest the app was started with
#[derive(Debug, Clone, Resource)]
pub struct SceneConfig(pub SceneManifest);

/// Exhibit descriptions for the details panel
#[derive(Debug, Clone, Resource, Default)]
pub struct Catalog(pub DescriptionCatalog);

/// Currently described exhibit
#[derive(Debug, Clone, Resource, Default)]
pub struct Selection(pub Option<SelectedExhibit>);

/// User-facing view state driven by the overlay and keyboard
#[derive(Debug, Clone, Resource)]
pub struct ViewerState {
    /// Whether the left (viewpoint) panel is open
    pub menu_open: bool,
    /// Whether the right (details) panel is open
    pub details_open: bool,
    pub theme: Theme,
    pub presets: PresetRing,
}

impl ViewerState {
    pub fn from_manifest(manifest: &SceneManifest) -> Self {
        Self {
            menu_open: false,
            details_open: false,
            theme: Theme::from_spec(&manifest.theme),
            presets: PresetRing::new(manifest.presets.len()),
        }
    }

    pub fn next_preset(&mut self) {
        self.presets.next();
    }

    pub fn previous_preset(&mut self) {
        self.presets.previous();
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_details(&mut self) {
        self.details_open = false;
    }
}

/// UI layout settings for responsive design
#[derive(Debug, Clone, Resource)]
pub struct UiLayout {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Whether we're on a small screen (mobile/tablet)
    pub is_mobile: bool,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,
            is_mobile: false,
        }
    }
}

impl UiLayout {
    /// Update layout based on screen dimensions
    pub fn update_for_screen(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
        // Consider mobile if width < 800 or if it's a portrait orientation with width < 600
        self.is_mobile = width < 800.0 || (width < height && width < 600.0);
    }

    /// Width of the viewpoint panel
    pub fn panel_width(&self) -> f32 {
        if self.is_mobile {
            (self.screen_width * 0.45).min(200.0)
        } else {
            250.0
        }
    }

    /// Width of the details panel
    pub fn right_panel_width(&self) -> f32 {
        if self.is_mobile {
            (self.screen_width * 0.6).min(240.0)
        } else {
            320.0
        }
    }
}
