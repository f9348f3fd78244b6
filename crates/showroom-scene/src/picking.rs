//! Exhibit picking: click-to-describe with a short emissive flash

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};

use crate::camera::{egui_wants_pointer, MainCamera};
use crate::models::Exhibit;
use crate::types::{Catalog, Selection, ViewerState};

/// A press that travels further than this is a drag, not a click
const CLICK_SLOP: f32 = 4.0;

/// Seconds a picked mesh stays lit
const FLASH_SECONDS: f32 = 0.5;

/// Emissive color of a picked mesh (#888888)
fn flash_emissive() -> LinearRgba {
    Color::srgb_u8(0x88, 0x88, 0x88).to_linear()
}

/// Where the current left press started
#[derive(Resource, Default)]
pub struct ClickTracker {
    press_position: Option<Vec2>,
}

impl ClickTracker {
    /// Start tracking a press; `None` for presses that began over the overlay
    pub fn press(&mut self, position: Option<Vec2>) {
        self.press_position = position;
    }

    /// Finish the press, returning the release point when it was a click
    pub fn release(&mut self, position: Option<Vec2>) -> Option<Vec2> {
        let start = self.press_position.take()?;
        let end = position?;
        (start.distance(end) <= CLICK_SLOP).then_some(end)
    }
}

/// World ray of a click waiting to be resolved against the exhibits
#[derive(Resource, Default)]
pub struct PendingPick(pub Option<Ray3d>);

/// A mesh temporarily drawn with a lit copy of its material
#[derive(Component)]
pub struct EmissiveFlash {
    pub remaining: f32,
    pub original: Handle<StandardMaterial>,
}

/// Plugin for exhibit picking
pub struct ExhibitPickingPlugin;

impl Plugin for ExhibitPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickTracker>()
            .init_resource::<PendingPick>()
            .add_systems(
                Update,
                (
                    (detect_clicks, resolve_pick).chain(),
                    fade_flashes,
                    close_details_on_escape,
                ),
            );
    }
}

/// Walk up the parent chain to the exhibit that owns `entity`
pub fn find_exhibit<'a>(
    entity: Entity,
    parents: &Query<&ChildOf>,
    exhibits: &'a Query<&Exhibit>,
) -> Option<&'a Exhibit> {
    let mut current = entity;
    loop {
        if let Ok(exhibit) = exhibits.get(current) {
            return Some(exhibit);
        }
        current = parents.get(current).ok()?.parent();
    }
}

/// Nearest mesh along `ray` that belongs to a pickable exhibit.
///
/// Meshes of non-pickable exhibits are skipped entirely, so they never hide
/// an exhibit standing behind them.
pub fn pick_target(
    ray: Ray3d,
    ray_cast: &mut MeshRayCast,
    parents: &Query<&ChildOf>,
    exhibits: &Query<&Exhibit>,
) -> Option<(Entity, String)> {
    let pickable = |entity: Entity| {
        find_exhibit(entity, parents, exhibits).is_some_and(|exhibit| exhibit.pickable)
    };
    let settings = MeshRayCastSettings::default()
        .with_visibility(RayCastVisibility::Visible)
        .with_filter(&pickable);

    let (entity, hit) = ray_cast.cast_ray(ray, &settings).first()?;
    let exhibit = find_exhibit(*entity, parents, exhibits)?;
    tracing::debug!(point = ?hit.point, distance = hit.distance, "Exhibit hit");
    Some((*entity, exhibit.name.clone()))
}

/// Turn left clicks outside the overlay into pick rays
fn detect_clicks(
    mut tracker: ResMut<ClickTracker>,
    mut pending: ResMut<PendingPick>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if mouse_button.just_pressed(MouseButton::Left) {
        let over_overlay = egui_wants_pointer(&mut contexts);
        tracker.press(if over_overlay { None } else { cursor });
        return;
    }
    if !mouse_button.just_released(MouseButton::Left) {
        return;
    }

    let Some(click) = tracker.release(cursor) else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    if let Ok(ray) = camera.viewport_to_world(camera_transform, click) {
        pending.0 = Some(ray);
    }
}

/// Describe the exhibit under a pending click and light the hit mesh
fn resolve_pick(
    mut commands: Commands,
    mut pending: ResMut<PendingPick>,
    mut ray_cast: MeshRayCast,
    parents: Query<&ChildOf>,
    exhibits: Query<&Exhibit>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut flashes: Query<&mut EmissiveFlash>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    catalog: Res<Catalog>,
    mut selection: ResMut<Selection>,
    mut viewer: ResMut<ViewerState>,
) {
    let Some(ray) = pending.0 else {
        return;
    };
    pending.0 = None;

    let Some((entity, name)) = pick_target(ray, &mut ray_cast, &parents, &exhibits) else {
        tracing::debug!("Click hit no exhibit");
        return;
    };

    tracing::info!(exhibit = %name, "Exhibit picked");
    selection.0 = Some(catalog.0.describe(&name));
    viewer.details_open = true;

    // Light the hit mesh through a private copy of its material
    if let Ok(mut flash) = flashes.get_mut(entity) {
        flash.remaining = FLASH_SECONDS;
        return;
    }
    let Ok(material) = mesh_materials.get(entity) else {
        return;
    };
    let Some(mut lit) = materials.get(&material.0).cloned() else {
        return;
    };
    lit.emissive = flash_emissive();
    let lit = materials.add(lit);
    commands.entity(entity).insert((
        MeshMaterial3d(lit),
        EmissiveFlash {
            remaining: FLASH_SECONDS,
            original: material.0.clone(),
        },
    ));
}

/// Restore original materials once a flash runs out
fn fade_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut EmissiveFlash)>,
) {
    for (entity, mut flash) in flashes.iter_mut() {
        flash.remaining -= time.delta_secs();
        if flash.remaining <= 0.0 {
            commands
                .entity(entity)
                .insert(MeshMaterial3d(flash.original.clone()))
                .remove::<EmissiveFlash>();
        }
    }
}

/// Handle Escape key to close the details panel
fn close_details_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut viewer: ResMut<ViewerState>,
) {
    if keyboard.just_pressed(KeyCode::Escape) && viewer.details_open {
        viewer.close_details();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::camera::primitives::MeshAabb;
    use bevy::ecs::system::SystemState;
    use bevy::time::TimeUpdateStrategy;
    use showroom_core::{DescriptionCatalog, SceneManifest};
    use std::time::Duration;

    fn picking_app() -> App {
        let manifest = SceneManifest::default();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<PendingPick>()
            .init_resource::<Selection>()
            .insert_resource(Catalog(DescriptionCatalog::from_manifest(&manifest)))
            .insert_resource(ViewerState::from_manifest(&manifest))
            .add_systems(Update, (resolve_pick, fade_flashes).chain());
        app
    }

    fn spawn_exhibit(app: &mut App, name: &str, pickable: bool, mesh: Mesh, z: f32) -> Entity {
        let aabb = mesh.compute_aabb().unwrap();
        let world = app.world_mut();
        let mesh = world.resource_mut::<Assets<Mesh>>().add(mesh);
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let translation = Vec3::new(0.0, 0.0, z);
        world
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                aabb,
                Transform::from_translation(translation),
                GlobalTransform::from_translation(translation),
                InheritedVisibility::VISIBLE,
                ViewVisibility::default(),
                Exhibit {
                    name: name.to_string(),
                    pickable,
                },
            ))
            .id()
    }

    fn click_along(app: &mut App, direction: Dir3) {
        app.world_mut().resource_mut::<PendingPick>().0 = Some(Ray3d::new(Vec3::ZERO, direction));
        app.update();
    }

    fn selected_name(app: &App) -> Option<String> {
        app.world().resource::<Selection>().0.as_ref().map(|s| s.name.clone())
    }

    fn material_of(app: &App, entity: Entity) -> Handle<StandardMaterial> {
        app.world()
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .unwrap()
            .0
            .clone()
    }

    #[test]
    fn test_find_exhibit_through_parents() {
        let mut world = World::new();
        let root = world
            .spawn(Exhibit {
                name: "Book Shelf".to_string(),
                pickable: true,
            })
            .id();
        let node = world.spawn(ChildOf(root)).id();
        let mesh = world.spawn(ChildOf(node)).id();
        let stray = world.spawn_empty().id();

        let mut state: SystemState<(Query<&ChildOf>, Query<&Exhibit>)> =
            SystemState::new(&mut world);
        let (parents, exhibits) = state.get(&world);

        let found = find_exhibit(mesh, &parents, &exhibits).unwrap();
        assert_eq!(found.name, "Book Shelf");
        assert_eq!(find_exhibit(root, &parents, &exhibits).unwrap().name, "Book Shelf");
        assert!(find_exhibit(stray, &parents, &exhibits).is_none());
    }

    #[test]
    fn test_click_versus_drag() {
        let mut tracker = ClickTracker::default();
        tracker.press(Some(Vec2::new(100.0, 100.0)));
        assert_eq!(
            tracker.release(Some(Vec2::new(103.0, 102.0))),
            Some(Vec2::new(103.0, 102.0))
        );

        tracker.press(Some(Vec2::new(100.0, 100.0)));
        assert_eq!(tracker.release(Some(Vec2::new(110.0, 100.0))), None);

        // Press over the overlay, or release outside the window
        tracker.press(None);
        assert_eq!(tracker.release(Some(Vec2::new(100.0, 100.0))), None);
        tracker.press(Some(Vec2::ZERO));
        assert_eq!(tracker.release(None), None);

        // A release without a tracked press is not a click
        assert_eq!(tracker.release(Some(Vec2::ZERO)), None);
    }

    #[test]
    fn test_pick_skips_unpickable_exhibit_in_front() {
        let mut app = picking_app();
        spawn_exhibit(&mut app, "Sphere", false, Sphere::new(1.0).mesh().uv(32, 16), -3.0);
        spawn_exhibit(&mut app, "Book Shelf", true, Cuboid::new(2.0, 2.0, 0.5).into(), -8.0);

        click_along(&mut app, Dir3::NEG_Z);

        assert_eq!(selected_name(&app).as_deref(), Some("Book Shelf"));
        assert!(app.world().resource::<ViewerState>().details_open);
    }

    #[test]
    fn test_pick_takes_nearest_pickable_exhibit() {
        let mut app = picking_app();
        spawn_exhibit(&mut app, "Book Shelf", true, Cuboid::new(2.0, 2.0, 0.5).into(), -8.0);
        spawn_exhibit(&mut app, "Digital Screen", true, Cuboid::new(2.0, 2.0, 0.5).into(), -3.0);

        click_along(&mut app, Dir3::NEG_Z);

        let selection = app.world().resource::<Selection>().0.clone().unwrap();
        assert_eq!(selection.name, "Digital Screen");
        assert_eq!(selection.description, "This is the description for digital screen");
    }

    #[test]
    fn test_miss_leaves_selection_unchanged() {
        let mut app = picking_app();
        spawn_exhibit(&mut app, "Book Shelf", true, Cuboid::new(2.0, 2.0, 0.5).into(), -8.0);

        click_along(&mut app, Dir3::NEG_Z);
        assert_eq!(selected_name(&app).as_deref(), Some("Book Shelf"));
        app.world_mut().resource_mut::<ViewerState>().close_details();

        click_along(&mut app, Dir3::Z);
        assert_eq!(selected_name(&app).as_deref(), Some("Book Shelf"));
        assert!(!app.world().resource::<ViewerState>().details_open);
    }

    #[test]
    fn test_flash_restores_original_material() {
        let mut app = picking_app();
        let shelf =
            spawn_exhibit(&mut app, "Book Shelf", true, Cuboid::new(2.0, 2.0, 0.5).into(), -8.0);
        let original = material_of(&app, shelf);

        click_along(&mut app, Dir3::NEG_Z);

        let lit = material_of(&app, shelf);
        assert_ne!(lit, original);
        let lit_material = app.world().resource::<Assets<StandardMaterial>>().get(&lit).unwrap();
        assert_eq!(lit_material.emissive, flash_emissive());
        assert!(app.world().get::<EmissiveFlash>(shelf).is_some());

        // Still lit partway through the flash
        app.update();
        assert!(app.world().get::<EmissiveFlash>(shelf).is_some());

        for _ in 0..4 {
            app.update();
        }
        assert!(app.world().get::<EmissiveFlash>(shelf).is_none());
        assert_eq!(material_of(&app, shelf), original);
    }

    #[test]
    fn test_repeat_pick_reuses_flash_material() {
        let mut app = picking_app();
        let shelf =
            spawn_exhibit(&mut app, "Book Shelf", true, Cuboid::new(2.0, 2.0, 0.5).into(), -8.0);

        click_along(&mut app, Dir3::NEG_Z);
        let lit = material_of(&app, shelf);
        let count = app.world().resource::<Assets<StandardMaterial>>().len();

        click_along(&mut app, Dir3::NEG_Z);
        assert_eq!(material_of(&app, shelf), lit);
        assert_eq!(app.world().resource::<Assets<StandardMaterial>>().len(), count);
        assert!(app.world().get::<EmissiveFlash>(shelf).unwrap().remaining > 0.25);
    }

    #[test]
    fn test_flash_color() {
        let lit = flash_emissive();
        assert!(lit.red > 0.2 && lit.red < 0.3);
        assert_eq!(lit.red, lit.green);
        assert_eq!(lit.green, lit.blue);
    }
}
