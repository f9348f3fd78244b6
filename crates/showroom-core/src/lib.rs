//! Showroom Core - Renderer-independent model of the scene viewer
//!
//! This crate provides the pieces of the viewer that do not depend on the
//! rendering engine:
//! - Scene manifest parsing and validation (TOML)
//! - Exhibit description lookup for the details panel
//! - Viewpoint ring navigation and field-of-view zoom
//! - Light/dark theme
//! - Camera easing and drag throttling math

pub mod catalog;
pub mod manifest;
pub mod motion;
pub mod presets;
pub mod theme;
pub mod zoom;

pub use catalog::{DescriptionCatalog, SelectedExhibit};
pub use manifest::{
    CameraSpec, LightSpec, ManifestError, ModelSpec, PresetSpec, PrimitiveSpec, SceneManifest,
    ShapeSpec, ThemeSpec,
};
pub use motion::DragThrottle;
pub use presets::PresetRing;
pub use theme::Theme;
pub use zoom::FovZoom;
