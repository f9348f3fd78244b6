//! Scene setup - camera, light and themed background

use bevy::prelude::*;
use showroom_core::manifest::parse_hex_color;
use showroom_core::{Theme, ThemeSpec};

use crate::camera::{CameraRig, MainCamera};
use crate::types::{SceneConfig, ViewerState};

/// Marker component for the main directional light
#[derive(Component)]
pub struct MainDirectionalLight;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene)
            .add_systems(Update, apply_theme_background);
    }
}

/// Convert a manifest color, falling back to white for anything unparsable
pub fn manifest_color(hex: &str) -> Color {
    match parse_hex_color(hex) {
        Ok([r, g, b]) => Color::srgb(r, g, b),
        Err(e) => {
            tracing::warn!("{}", e);
            Color::WHITE
        }
    }
}

/// Background clear color for a theme
pub fn theme_background(theme: Theme, spec: &ThemeSpec) -> Color {
    match theme.background(spec) {
        Ok([r, g, b]) => Color::srgb(r, g, b),
        Err(e) => {
            tracing::warn!("{}", e);
            if theme.is_dark() { Color::BLACK } else { Color::WHITE }
        }
    }
}

fn setup_scene(
    mut commands: Commands,
    config: Res<SceneConfig>,
    rig: Res<CameraRig>,
) {
    let camera = &config.0.camera;

    // Camera starts on the first viewpoint, looking down -Z
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: rig.zoom.radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Transform::from_translation(rig.position),
        MainCamera,
    ));

    // Soft fill so unlit sides of models stay readable
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 150.0,
        ..default()
    });

    let light = &config.0.light;
    commands.spawn((
        DirectionalLight {
            color: manifest_color(&light.color),
            illuminance: light.illuminance,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(light.position))
            .looking_at(Vec3::ZERO, Vec3::Y),
        MainDirectionalLight,
    ));

    tracing::info!(title = %config.0.title, "Scene ready");
}

/// Keep the clear color in step with the theme
fn apply_theme_background(
    viewer: Res<ViewerState>,
    config: Res<SceneConfig>,
    mut clear_color: ResMut<ClearColor>,
) {
    if !viewer.is_changed() {
        return;
    }
    let background = theme_background(viewer.theme, &config.0.theme);
    if clear_color.0 != background {
        clear_color.0 = background;
    }
}
