//! Showroom Scene - Shared 3D rendering and UI components
//!
//! This crate provides the Bevy side of the viewer: the camera rig with
//! drag-to-look and eased viewpoint changes, exhibit spawning from the scene
//! manifest, click picking with the details panel, and the egui overlay.
//! Front ends add [`ShowroomScenePlugin`] after the picking and egui plugins.

pub mod camera;
pub mod models;
pub mod picking;
pub mod scene;
pub mod types;
pub mod ui;

use bevy::prelude::*;
use showroom_core::{DescriptionCatalog, SceneManifest, Theme};

/// Plugin that sets up the whole viewer for one manifest
pub struct ShowroomScenePlugin {
    pub manifest: SceneManifest,
}

impl ShowroomScenePlugin {
    pub fn new(manifest: SceneManifest) -> Self {
        Self { manifest }
    }
}

impl Plugin for ShowroomScenePlugin {
    fn build(&self, app: &mut App) {
        let manifest = &self.manifest;
        app.insert_resource(SceneConfig(manifest.clone()))
            .insert_resource(Catalog(DescriptionCatalog::from_manifest(manifest)))
            .insert_resource(ViewerState::from_manifest(manifest))
            .insert_resource(CameraRig::from_manifest(manifest))
            .insert_resource(ClearColor(scene::theme_background(
                Theme::from_spec(&manifest.theme),
                &manifest.theme,
            )))
            .init_resource::<Selection>()
            .init_resource::<UiLayout>()
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(models::ModelsPlugin)
            .add_plugins(picking::ExhibitPickingPlugin)
            .add_plugins(ui::UiPlugin);
    }
}

// Re-export commonly used types
pub use camera::{CameraRig, MainCamera};
pub use models::Exhibit;
pub use types::*;
