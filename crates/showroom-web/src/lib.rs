//! Showroom Web - WebGPU-powered 3D scene viewer
//!
//! This crate assembles the Bevy app for the browser. The page provides a
//! `<canvas id="showroom-canvas">`; an optional `?scene=<url>` parameter
//! points at a TOML scene manifest.

pub mod app;
#[cfg(target_arch = "wasm32")]
mod scene_loader;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM entry point
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build()
    );

    wasm_bindgen_futures::spawn_local(async {
        let manifest = scene_loader::load_manifest().await;
        app::run(manifest);
    });
}
