//! Exhibit spawning: primitive meshes and glTF models from the manifest

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use showroom_core::{ModelSpec, PrimitiveSpec, ShapeSpec};
use std::collections::HashMap;

use crate::scene::manifest_color;
use crate::types::SceneConfig;

/// Root entity of something placed in the scene by the manifest.
/// glTF descendants are resolved to their exhibit through the parent chain.
#[derive(Component, Debug, Clone)]
pub struct Exhibit {
    pub name: String,
    /// Whether clicking this exhibit opens the details panel
    pub pickable: bool,
}

/// glTF loads still being watched for failure
#[derive(Resource, Default)]
pub struct ModelLoads {
    pub pending: HashMap<String, Handle<Gltf>>,
}

/// Plugin for exhibit spawning
pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelLoads>()
            .add_systems(Startup, spawn_exhibits)
            .add_systems(Update, watch_model_loads);
    }
}

fn spawn_exhibits(
    mut commands: Commands,
    config: Res<SceneConfig>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut loads: ResMut<ModelLoads>,
) {
    for primitive in &config.0.primitives {
        let mesh = meshes.add(primitive_mesh(primitive));
        let material = materials.add(StandardMaterial {
            base_color: manifest_color(&primitive.color),
            perceptual_roughness: 0.6,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(Vec3::from_array(primitive.position)),
            Exhibit {
                name: primitive.name.clone(),
                pickable: primitive.pickable,
            },
            Name::new(primitive.name.clone()),
        ));
    }

    for model in &config.0.models {
        // Loading the Gltf handle lets failures be reported; the scene label shares the load
        let gltf: Handle<Gltf> = asset_server.load(model.path.clone());
        let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model.path.clone()));
        loads.pending.insert(model.name.clone(), gltf);

        commands.spawn((
            SceneRoot(scene),
            model_transform(model),
            Exhibit {
                name: model.name.clone(),
                pickable: true,
            },
            Name::new(model.name.clone()),
        ));
        tracing::info!(name = %model.name, path = %model.path, "Loading model");
    }
}

/// Build the render mesh for a primitive
pub fn primitive_mesh(primitive: &PrimitiveSpec) -> Mesh {
    match &primitive.shape {
        ShapeSpec::Sphere { radius, sectors, stacks } => {
            Sphere::new(*radius).mesh().uv(*sectors, *stacks)
        }
        ShapeSpec::Cuboid { size } => Cuboid::new(size[0], size[1], size[2]).into(),
    }
}

/// Placement of a model root: position, yaw and uniform scale
pub fn model_transform(model: &ModelSpec) -> Transform {
    Transform::from_translation(Vec3::from_array(model.position))
        .with_rotation(Quat::from_rotation_y(model.rotation_y_degrees.to_radians()))
        .with_scale(Vec3::splat(model.scale))
}

/// Report finished and failed model loads once each
fn watch_model_loads(
    mut loads: ResMut<ModelLoads>,
    asset_server: Res<AssetServer>,
) {
    if loads.pending.is_empty() {
        return;
    }

    loads.pending.retain(|name, handle| match asset_server.get_load_state(handle.id()) {
        Some(LoadState::Loaded) => {
            tracing::info!("Model loaded: {}", name);
            false
        }
        Some(LoadState::Failed(err)) => {
            tracing::error!("Failed to load model {}: {}", name, err);
            false
        }
        _ => true,
    });
}
