//! Camera rig: drag-to-look, viewpoint easing and field-of-view zoom

use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use showroom_core::motion::{approach, decay_factor, DRAG_DEAD_ZONE, SETTLE_EPSILON};
use showroom_core::{DragThrottle, FovZoom, SceneManifest};

use crate::types::{SceneConfig, ViewerState};

/// Pixels of wheel travel treated as one zoom notch
const PIXELS_PER_NOTCH: f32 = 100.0;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Camera position easing and zoom state
#[derive(Debug, Clone, Resource)]
pub struct CameraRig {
    pub position: Vec3,
    pub target_position: Vec3,
    /// Whether `position` has reached `target_position` on every axis
    pub settled: bool,
    pub zoom: FovZoom,
    /// Radians of rotation per pixel of drag
    pub sensitivity: f32,
    /// Pitch limit in radians
    pub max_pitch: f32,
    pub menu_offset_x: f32,
    pub smoothing: f32,
}

impl CameraRig {
    pub fn from_manifest(manifest: &SceneManifest) -> Self {
        let cam = &manifest.camera;
        let start = manifest
            .presets
            .first()
            .map(|p| Vec3::from_array(p.position()))
            .unwrap_or(Vec3::new(0.0, 0.0, 2.0));
        Self {
            position: start,
            target_position: start,
            settled: true,
            zoom: FovZoom::from_spec(cam),
            sensitivity: cam.look_sensitivity,
            max_pitch: cam.max_pitch_degrees.to_radians(),
            menu_offset_x: cam.menu_offset_x,
            smoothing: cam.smoothing,
        }
    }

    /// Where the camera should rest for a viewpoint, shifted aside while the menu is open
    pub fn resting_position(&self, preset: Vec3, menu_open: bool) -> Vec3 {
        if menu_open {
            preset + Vec3::X * self.menu_offset_x
        } else {
            preset
        }
    }

    pub fn set_target(&mut self, target: Vec3) {
        if target != self.target_position {
            self.target_position = target;
            self.settled = false;
        }
    }

    /// Advance the easing by `dt` seconds and return the new position
    pub fn step(&mut self, dt: f32) -> Vec3 {
        let factor = decay_factor(self.smoothing, dt);
        let (x, sx) = approach(self.position.x, self.target_position.x, factor, SETTLE_EPSILON);
        let (y, sy) = approach(self.position.y, self.target_position.y, factor, SETTLE_EPSILON);
        let (z, sz) = approach(self.position.z, self.target_position.z, factor, SETTLE_EPSILON);
        self.position = Vec3::new(x, y, z);
        self.settled = sx && sy && sz;
        self.position
    }
}

/// Drag state for the look controller
#[derive(Resource, Default)]
pub struct DragLook {
    pub throttle: DragThrottle,
}

/// Compose a drag delta into a new look direction.
///
/// Horizontal motion yaws about world up. Vertical motion beyond the dead
/// zone pitches about the camera's horizontal right axis. The result is
/// kept within `max_pitch` of the horizon.
pub fn compose_look(rotation: Quat, delta: Vec2, sensitivity: f32, max_pitch: f32) -> Vec3 {
    let forward = rotation * Vec3::NEG_Z;
    let yaw = Quat::from_rotation_y(delta.x * sensitivity);

    let mut right = rotation * Vec3::X;
    right.y = 0.0;
    let right = right.try_normalize().unwrap_or(Vec3::X);

    let pitch = if delta.y.abs() > DRAG_DEAD_ZONE {
        Quat::from_axis_angle(right, delta.y * sensitivity)
    } else {
        Quat::IDENTITY
    };

    let direction = (yaw * pitch * forward).normalize_or(forward);
    let fallback = Vec3::new(forward.x, 0.0, forward.z).try_normalize().unwrap_or(Vec3::NEG_Z);
    clamp_pitch(direction, max_pitch, yaw * fallback)
}

/// Limit the elevation of `direction` to `±max_pitch`, keeping its heading.
/// `heading` is used when `direction` is vertical and has none.
pub fn clamp_pitch(direction: Vec3, max_pitch: f32, heading: Vec3) -> Vec3 {
    let horizontal = Vec2::new(direction.x, direction.z).length();
    let elevation = direction.y.atan2(horizontal);
    if elevation.abs() <= max_pitch {
        return direction;
    }

    let flat = if horizontal > 1e-6 {
        Vec3::new(direction.x / horizontal, 0.0, direction.z / horizontal)
    } else {
        heading
    };
    let clamped = elevation.clamp(-max_pitch, max_pitch);
    flat * clamped.cos() + Vec3::Y * clamped.sin()
}

/// Plugin for camera controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragLook>()
            .add_systems(
                Update,
                (
                    (update_rig_target, ease_camera).chain(),
                    drag_look,
                    (scroll_zoom, apply_zoom).chain(),
                ),
            );
    }
}

/// Whether the overlay is under the pointer or capturing it
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// Recompute the resting position when the viewpoint or menu changes
fn update_rig_target(
    viewer: Res<ViewerState>,
    config: Res<SceneConfig>,
    mut rig: ResMut<CameraRig>,
) {
    if !viewer.is_changed() {
        return;
    }

    let Some(preset) = config.0.presets.get(viewer.presets.index()) else {
        return;
    };
    let target = rig.resting_position(Vec3::from_array(preset.position()), viewer.menu_open);
    if target != rig.target_position {
        tracing::debug!(preset = %preset.name, ?target, "Camera target changed");
    }
    rig.set_target(target);
}

/// Ease the camera toward its resting position
fn ease_camera(
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if rig.settled {
        return;
    }
    let position = rig.step(time.delta_secs());

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = position;
    }
}

/// Turn left-button drags into look rotation
fn drag_look(
    mut drag: ResMut<DragLook>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rig: Res<CameraRig>,
    time: Res<Time>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut contexts: EguiContexts,
) {
    if mouse_button.just_released(MouseButton::Left) {
        drag.throttle.end();
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) && !egui_wants_pointer(&mut contexts) {
        drag.throttle.begin(cursor.to_array());
        return;
    }

    if !mouse_button.pressed(MouseButton::Left) {
        return;
    }

    let Some(delta) = drag.throttle.update(cursor.to_array(), time.elapsed_secs_f64()) else {
        return;
    };

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    let delta = Vec2::from_array(delta);
    let direction = compose_look(transform.rotation, delta, rig.sensitivity, rig.max_pitch);
    transform.look_to(direction, Vec3::Y);
}

/// Mouse wheel zoom, one field-of-view step per notch
fn scroll_zoom(
    scroll: Res<AccumulatedMouseScroll>,
    mut rig: ResMut<CameraRig>,
    mut contexts: EguiContexts,
) {
    if scroll.delta.y == 0.0 || egui_wants_pointer(&mut contexts) {
        return;
    }

    let notches = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_NOTCH,
    };
    if rig.zoom.scroll(notches) {
        tracing::debug!(fov = rig.zoom.degrees(), "Zoom changed");
    }
}

/// Write the rig's field of view into the camera projection
fn apply_zoom(
    rig: Res<CameraRig>,
    mut projection_query: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(mut projection) = projection_query.single_mut() else {
        return;
    };
    let fov = rig.zoom.radians();
    let Projection::Perspective(current) = &*projection else {
        return;
    };
    if current.fov == fov {
        return;
    }
    if let Projection::Perspective(perspective) = projection.as_mut() {
        perspective.fov = fov;
    }
}
