//! Scene manifest loading from the `?scene=` URL parameter

use showroom_core::SceneManifest;
use wasm_bindgen::JsCast;

/// Query parameter naming the manifest URL
const SCENE_PARAM: &str = "scene";

/// Resolve the manifest for this page: the `?scene=` URL when present and
/// valid, the built-in scene otherwise
pub async fn load_manifest() -> SceneManifest {
    let Some(url) = scene_url() else {
        return SceneManifest::default();
    };

    tracing::info!("Loading scene manifest from URL parameter: {}", url);
    match fetch_text(&url).await {
        Ok(content) => match SceneManifest::from_toml(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::error!("Scene manifest {} rejected: {}", url, e);
                SceneManifest::default()
            }
        },
        Err(e) => {
            tracing::error!("Scene manifest {} could not be fetched: {}", url, e);
            SceneManifest::default()
        }
    }
}

fn scene_url() -> Option<String> {
    let window = web_sys::window()?;
    let href = window.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params().get(SCENE_PARAM).filter(|s| !s.is_empty())
}

/// Fetch text content from URL
async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;

    let resp = wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("Fetch failed: {:?}", e))?;

    let resp: web_sys::Response = resp.dyn_into().map_err(|_| "Response cast failed")?;

    if !resp.ok() {
        return Err(format!("HTTP {}: {}", resp.status(), resp.status_text()));
    }

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|_| "Failed to get text")?)
        .await
        .map_err(|e| format!("Text extraction failed: {:?}", e))?;

    text.as_string().ok_or_else(|| "Not a string".to_string())
}
