//! Bevy application setup

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::{DefaultPickingPlugins, prelude::MeshPickingPlugin};
use showroom_core::SceneManifest;
use showroom_scene::ShowroomScenePlugin;

/// CSS selector of the canvas the viewer renders into
pub const CANVAS_SELECTOR: &str = "#showroom-canvas";

/// Run the Bevy application for a manifest
pub fn run(manifest: SceneManifest) {
    tracing::info!(
        title = %manifest.title,
        models = manifest.models.len(),
        "Starting showroom"
    );

    App::new()
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: manifest.title.clone(),
                    canvas: Some(CANVAS_SELECTOR.to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                // Models are served next to the page
                file_path: asset_root(),
                // Don't look for .meta files - static hosting doesn't have them
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        // Picking plugins must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .add_plugins(ShowroomScenePlugin::new(manifest))
        .run();
}

#[cfg(target_arch = "wasm32")]
fn asset_root() -> String {
    String::new()
}

#[cfg(not(target_arch = "wasm32"))]
fn asset_root() -> String {
    "assets".to_string()
}
