//! Exhibit descriptions shown in the details panel

use std::collections::HashMap;

use crate::manifest::SceneManifest;

/// Text shown when an exhibit has no description
pub const NO_DESCRIPTION: &str = "No description available";

/// Name shown when a picked mesh carries no exhibit name
pub const UNKNOWN_EXHIBIT: &str = "unknown";

/// What the details panel shows for a picked exhibit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedExhibit {
    pub name: String,
    pub description: String,
}

/// Name to description lookup built from the manifest
#[derive(Debug, Clone, Default)]
pub struct DescriptionCatalog {
    descriptions: HashMap<String, String>,
}

impl DescriptionCatalog {
    pub fn from_manifest(manifest: &SceneManifest) -> Self {
        let primitives = manifest
            .primitives
            .iter()
            .filter_map(|p| p.description.as_ref().map(|d| (p.name.clone(), d.clone())));
        let models = manifest
            .models
            .iter()
            .filter_map(|m| m.description.as_ref().map(|d| (m.name.clone(), d.clone())));

        Self {
            descriptions: primitives.chain(models).collect(),
        }
    }

    /// Build the panel content for an exhibit name
    pub fn describe(&self, name: &str) -> SelectedExhibit {
        let name = if name.is_empty() { UNKNOWN_EXHIBIT } else { name };
        let description = self
            .descriptions
            .get(name)
            .cloned()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        SelectedExhibit {
            name: name.to_string(),
            description,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_exhibits() {
        let catalog = DescriptionCatalog::from_manifest(&SceneManifest::default());
        assert_eq!(catalog.len(), 2);

        let screen = catalog.describe("Digital Screen");
        assert_eq!(screen.name, "Digital Screen");
        assert_eq!(screen.description, "This is the description for digital screen");

        let shelf = catalog.describe("Book Shelf");
        assert_eq!(shelf.description, "This is the description for book shelf");
    }

    #[test]
    fn test_describe_fallbacks() {
        let catalog = DescriptionCatalog::from_manifest(&SceneManifest::default());

        // Present in the scene but without a description
        assert_eq!(catalog.describe("Sphere").description, NO_DESCRIPTION);

        let unnamed = catalog.describe("");
        assert_eq!(unnamed.name, UNKNOWN_EXHIBIT);
        assert_eq!(unnamed.description, NO_DESCRIPTION);
    }
}
