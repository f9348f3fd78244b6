//! Scene manifest - declarative description of what the viewer shows
//!
//! The manifest lists the camera limits, the viewpoint ring, the light, the
//! primitives and glTF models placed in the scene, and the theme colors.
//! Every field has a default so a manifest only needs to name what differs
//! from the built-in scene.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read scene manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scene manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid scene manifest: {0}")]
    Invalid(String),
    #[error("Invalid color '{0}', expected #RRGGBB")]
    BadColor(String),
}

/// Complete scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub camera: CameraSpec,
    #[serde(default)]
    pub light: LightSpec,
    #[serde(default = "default_presets", rename = "preset")]
    pub presets: Vec<PresetSpec>,
    #[serde(default = "default_primitives", rename = "primitive")]
    pub primitives: Vec<PrimitiveSpec>,
    #[serde(default = "default_models", rename = "model")]
    pub models: Vec<ModelSpec>,
    #[serde(default)]
    pub theme: ThemeSpec,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            title: default_title(),
            camera: CameraSpec::default(),
            light: LightSpec::default(),
            presets: default_presets(),
            primitives: default_primitives(),
            models: default_models(),
            theme: ThemeSpec::default(),
        }
    }
}

fn default_title() -> String {
    "Showroom".to_string()
}

/// Camera projection limits and motion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    /// Initial vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_min_fov")]
    pub min_fov: f32,
    #[serde(default = "default_max_fov")]
    pub max_fov: f32,
    /// Degrees added or removed per zoom step
    #[serde(default = "default_fov_step")]
    pub fov_step: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Radians of rotation per pixel of drag
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
    /// Maximum look elevation above or below the horizon, in degrees
    #[serde(default = "default_max_pitch")]
    pub max_pitch_degrees: f32,
    /// Sideways shift applied while the menu panel is open
    #[serde(default = "default_menu_offset")]
    pub menu_offset_x: f32,
    /// Decay rate per 60 Hz frame, see [`crate::motion::decay_factor`]
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov(),
            min_fov: default_min_fov(),
            max_fov: default_max_fov(),
            fov_step: default_fov_step(),
            near: default_near(),
            far: default_far(),
            look_sensitivity: default_look_sensitivity(),
            max_pitch_degrees: default_max_pitch(),
            menu_offset_x: default_menu_offset(),
            smoothing: default_smoothing(),
        }
    }
}

fn default_fov() -> f32 {
    75.0
}

fn default_min_fov() -> f32 {
    30.0
}

fn default_max_fov() -> f32 {
    90.0
}

fn default_fov_step() -> f32 {
    5.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

fn default_look_sensitivity() -> f32 {
    0.002
}

fn default_max_pitch() -> f32 {
    85.0
}

fn default_menu_offset() -> f32 {
    -1.5
}

fn default_smoothing() -> f32 {
    // -ln(0.9): a 10% step toward the target per 60 Hz frame
    0.10536
}

/// A named camera position on the viewpoint ring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetSpec {
    pub name: String,
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub z: f32,
}

impl PresetSpec {
    fn new(name: &str, x: f32, z: f32) -> Self {
        Self {
            name: name.to_string(),
            x,
            y: 0.0,
            z,
        }
    }

    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

fn default_presets() -> Vec<PresetSpec> {
    vec![
        PresetSpec::new("Front", 0.0, 2.0),
        PresetSpec::new("Right", 2.0, 2.0),
        PresetSpec::new("Back off", 0.0, 4.0),
        PresetSpec::new("Left", -2.0, 2.0),
    ]
}

/// Directional light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    #[serde(default = "default_white")]
    pub color: String,
    /// Illuminance in lux
    #[serde(default = "default_illuminance")]
    pub illuminance: f32,
    /// Light position; it shines toward the origin
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
}

impl Default for LightSpec {
    fn default() -> Self {
        Self {
            color: default_white(),
            illuminance: default_illuminance(),
            position: default_light_position(),
        }
    }
}

fn default_white() -> String {
    "#FFFFFF".to_string()
}

fn default_illuminance() -> f32 {
    3000.0
}

fn default_light_position() -> [f32; 3] {
    [-1.0, 2.0, 4.0]
}

/// Primitive mesh shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Sphere {
        radius: f32,
        #[serde(default = "default_sectors")]
        sectors: u32,
        #[serde(default = "default_stacks")]
        stacks: u32,
    },
    Cuboid {
        size: [f32; 3],
    },
}

fn default_sectors() -> u32 {
    32
}

fn default_stacks() -> u32 {
    16
}

/// A primitive mesh placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSpec {
    pub name: String,
    pub shape: ShapeSpec,
    #[serde(default = "default_white")]
    pub color: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Whether clicking the primitive opens the description panel
    #[serde(default)]
    pub pickable: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_primitives() -> Vec<PrimitiveSpec> {
    vec![PrimitiveSpec {
        name: "Sphere".to_string(),
        shape: ShapeSpec::Sphere {
            radius: 1.0,
            sectors: default_sectors(),
            stacks: default_stacks(),
        },
        color: "#44AA88".to_string(),
        position: [5.0, 0.0, 0.0],
        pickable: false,
        description: None,
    }]
}

/// A glTF model placed in the scene. Models are always pickable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    /// Asset path relative to the asset root
    pub path: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// Rotation about the vertical axis, in degrees
    #[serde(default)]
    pub rotation_y_degrees: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_scale() -> f32 {
    1.0
}

fn default_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec {
            name: "Digital Screen".to_string(),
            path: "models/digital-screen.glb".to_string(),
            position: [0.0, -2.0, 0.0],
            rotation_y_degrees: -90.0,
            scale: 0.5,
            description: Some("This is the description for digital screen".to_string()),
        },
        ModelSpec {
            name: "Book Shelf".to_string(),
            path: "models/book-shelf.glb".to_string(),
            position: [-5.0, -2.0, 0.0],
            rotation_y_degrees: 90.0,
            scale: 0.5,
            description: Some("This is the description for book shelf".to_string()),
        },
    ]
}

/// Background colors per theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSpec {
    #[serde(default = "default_white")]
    pub light_background: String,
    #[serde(default = "default_black")]
    pub dark_background: String,
    #[serde(default)]
    pub start_dark: bool,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        Self {
            light_background: default_white(),
            dark_background: default_black(),
            start_dark: false,
        }
    }
}

fn default_black() -> String {
    "#000000".to_string()
}

impl SceneManifest {
    /// Load and validate a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a manifest from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let manifest: SceneManifest = toml::from_str(content)?;
        manifest.validate()?;
        tracing::debug!(
            presets = manifest.presets.len(),
            primitives = manifest.primitives.len(),
            models = manifest.models.len(),
            "Scene manifest loaded"
        );
        Ok(manifest)
    }

    /// Check camera limits, shapes, colors and exhibit names
    pub fn validate(&self) -> Result<(), ManifestError> {
        let cam = &self.camera;
        if self.presets.is_empty() {
            return Err(invalid("at least one preset is required"));
        }
        let fov_ordered = cam.min_fov > 0.0
            && cam.min_fov <= cam.fov_degrees
            && cam.fov_degrees <= cam.max_fov
            && cam.max_fov < 180.0;
        if !fov_ordered {
            return Err(invalid(format!(
                "field of view must satisfy 0 < min ({}) <= initial ({}) <= max ({}) < 180",
                cam.min_fov, cam.fov_degrees, cam.max_fov
            )));
        }
        // Negated comparisons so NaN is rejected too
        if !(cam.fov_step > 0.0) {
            return Err(invalid("fov_step must be positive"));
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            return Err(invalid("clipping planes must satisfy 0 < near < far"));
        }
        if !(cam.max_pitch_degrees > 0.0 && cam.max_pitch_degrees < 90.0) {
            return Err(invalid("max_pitch_degrees must be within (0, 90)"));
        }
        if !(cam.smoothing > 0.0) {
            return Err(invalid("smoothing must be positive"));
        }
        if !cam.look_sensitivity.is_finite() {
            return Err(invalid("look_sensitivity must be finite"));
        }
        if !cam.menu_offset_x.is_finite() {
            return Err(invalid("menu_offset_x must be finite"));
        }

        parse_hex_color(&self.light.color)?;
        parse_hex_color(&self.theme.light_background)?;
        parse_hex_color(&self.theme.dark_background)?;

        let mut names = HashSet::new();
        for primitive in &self.primitives {
            parse_hex_color(&primitive.color)?;
            let positive = match &primitive.shape {
                ShapeSpec::Sphere { radius, sectors, stacks } => {
                    *radius > 0.0 && *sectors >= 3 && *stacks >= 2
                }
                ShapeSpec::Cuboid { size } => size.iter().all(|s| *s > 0.0),
            };
            if !positive {
                return Err(invalid(format!(
                    "primitive '{}' has a degenerate shape",
                    primitive.name
                )));
            }
            if !names.insert(primitive.name.as_str()) {
                return Err(invalid(format!("duplicate exhibit name '{}'", primitive.name)));
            }
        }
        for model in &self.models {
            if !(model.scale > 0.0) {
                return Err(invalid(format!("model '{}' must have a positive scale", model.name)));
            }
            if model.path.trim().is_empty() {
                return Err(invalid(format!("model '{}' has no path", model.name)));
            }
            if !names.insert(model.name.as_str()) {
                return Err(invalid(format!("duplicate exhibit name '{}'", model.name)));
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ManifestError {
    ManifestError::Invalid(msg.into())
}

/// Parse a `#RRGGBB` sRGB color into `[r, g, b]` in 0.0-1.0
pub fn parse_hex_color(s: &str) -> Result<[f32; 3], ManifestError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ManifestError::BadColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ManifestError::BadColor(s.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_scene() {
        let manifest = SceneManifest::default();
        manifest.validate().unwrap();

        assert_eq!(manifest.presets.len(), 4);
        assert_eq!(manifest.presets[0].position(), [0.0, 0.0, 2.0]);
        assert_eq!(manifest.presets[3].position(), [-2.0, 0.0, 2.0]);
        assert_eq!(manifest.camera.fov_degrees, 75.0);
        assert_eq!(manifest.models[1].name, "Book Shelf");
        assert!(!manifest.primitives[0].pickable);
    }

    #[test]
    fn test_partial_manifest_keeps_defaults() {
        let toml = r#"
title = "Gallery"

[camera]
fov_degrees = 60.0

[[preset]]
name = "Only"
x = 1.0
z = 3.0
"#;

        let manifest = SceneManifest::from_toml(toml).unwrap();
        assert_eq!(manifest.title, "Gallery");
        assert_eq!(manifest.camera.fov_degrees, 60.0);
        assert_eq!(manifest.camera.max_fov, 90.0);
        assert_eq!(manifest.presets.len(), 1);
        assert_eq!(manifest.presets[0].y, 0.0);
        // Sections left out fall back to the built-in scene
        assert_eq!(manifest.models.len(), 2);
    }

    #[test]
    fn test_shapes() {
        let toml = r##"
[[primitive]]
name = "Crate"
shape = { kind = "cuboid", size = [1.0, 2.0, 1.0] }
color = "#AA0000"
pickable = true
description = "A wooden crate"

[[primitive]]
name = "Ball"
shape = { kind = "sphere", radius = 0.5 }
"##;

        let manifest = SceneManifest::from_toml(toml).unwrap();
        assert_eq!(manifest.primitives.len(), 2);
        assert!(manifest.primitives[0].pickable);
        match &manifest.primitives[1].shape {
            ShapeSpec::Sphere { sectors, stacks, .. } => {
                assert_eq!(*sectors, 32);
                assert_eq!(*stacks, 16);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_rejects_inverted_fov_limits() {
        let toml = r#"
[camera]
min_fov = 80.0
max_fov = 40.0
"#;
        let err = SceneManifest::from_toml(toml).unwrap_err();
        assert!(matches!(err, ManifestError::Invalid(_)));
    }

    #[test]
    fn test_rejects_nan_tuning() {
        for camera in ["fov_step = nan", "smoothing = nan", "look_sensitivity = inf"] {
            let toml = format!("[camera]\n{}\n", camera);
            let err = SceneManifest::from_toml(&toml).unwrap_err();
            assert!(matches!(err, ManifestError::Invalid(_)), "{} accepted", camera);
        }

        let toml = r#"
[[model]]
name = "Statue"
path = "statue.glb"
scale = nan
"#;
        let err = SceneManifest::from_toml(toml).unwrap_err();
        assert!(matches!(err, ManifestError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_preset_ring() {
        let mut manifest = SceneManifest::default();
        manifest.presets.clear();
        assert!(matches!(manifest.validate(), Err(ManifestError::Invalid(_))));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut manifest = SceneManifest::default();
        manifest.models[1].name = "Digital Screen".to_string();
        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_bad_color() {
        let mut manifest = SceneManifest::default();
        manifest.theme.dark_background = "black".to_string();
        assert!(matches!(manifest.validate(), Err(ManifestError::BadColor(_))));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(parse_hex_color("000000").unwrap(), [0.0, 0.0, 0.0]);
        let [r, g, b] = parse_hex_color("#44aa88").unwrap();
        assert!((r - 68.0 / 255.0).abs() < 1e-6);
        assert!((g - 170.0 / 255.0).abs() < 1e-6);
        assert!((b - 136.0 / 255.0).abs() < 1e-6);
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title = \"From disk\"").unwrap();

        let manifest = SceneManifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.title, "From disk");

        let missing = SceneManifest::from_file(Path::new("/nonexistent/showroom.toml"));
        assert!(matches!(missing, Err(ManifestError::Io(_))));
    }
}
