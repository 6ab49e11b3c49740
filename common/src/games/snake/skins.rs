use std::io::ErrorKind;
use std::path::Path;

use crate::identifiers::SkinId;
use crate::games::SessionRng;
use crate::log;

pub const DEFAULT_BODY_SKIN_FILE: &str = "default-body.png";

const SKIN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Cosmetic assets known to the simulation. Decoding the images is left to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkinRegistry {
    pub default_body: Option<SkinId>,
    pub food_skins: Vec<SkinId>,
}

impl SkinRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Scans `folder` for icon files, creating the folder when it does not exist yet.
    pub fn from_folder(folder: &Path) -> Result<Self, String> {
        let entries = match std::fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                std::fs::create_dir_all(folder)
                    .map_err(|e| format!("Failed to create icons folder: {}", e))?;
                log!("Created '{}' folder. Please add icon images to this folder.", folder.display());
                return Ok(Self::empty());
            }
            Err(err) => return Err(format!("Failed to read icons folder: {}", err)),
        };

        let mut file_names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| format!("Failed to read icons folder entry: {}", e))?;
            if let Some(name) = entry.file_name().to_str() {
                file_names.push(name.to_string());
            }
        }

        let registry = Self::from_file_names(file_names);
        if registry.default_body.is_none() {
            log!(
                "No '{}' found in '{}'. Using default color for snake body.",
                DEFAULT_BODY_SKIN_FILE,
                folder.display()
            );
        }
        if registry.food_skins.is_empty() {
            log!("No food icons found in '{}'. Using default square for food.", folder.display());
        }
        Ok(registry)
    }

    /// Classifies icon file names; non-image files are skipped.
    pub fn from_file_names<I, S>(file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = file_names
            .into_iter()
            .map(Into::into)
            .filter(|name| is_skin_file(name))
            .collect();
        names.sort();

        let mut registry = Self::empty();
        for name in names {
            if name == DEFAULT_BODY_SKIN_FILE {
                registry.default_body = Some(SkinId::new(name));
            } else {
                registry.food_skins.push(SkinId::new(name));
            }
        }
        registry
    }

    pub fn pick_food_skin(&self, rng: &mut SessionRng) -> Option<SkinId> {
        rng.choose(&self.food_skins).cloned()
    }
}

fn is_skin_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SKIN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_folder() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("face_snake_icons_{}", random_number))
    }

    #[test]
    fn test_file_names_are_classified() {
        let registry = SkinRegistry::from_file_names([
            "notes.txt",
            "pear.JPG",
            "default-body.png",
            "apple.png",
            "banana.gif",
        ]);
        assert_eq!(registry.default_body, Some(SkinId::from("default-body.png")));
        assert_eq!(
            registry.food_skins,
            vec![SkinId::from("apple.png"), SkinId::from("banana.gif"), SkinId::from("pear.JPG")]
        );
    }

    #[test]
    fn test_pick_food_skin_without_icons() {
        let mut rng = SessionRng::new(3);
        assert_eq!(SkinRegistry::empty().pick_food_skin(&mut rng), None);

        let registry = SkinRegistry::from_file_names(["kiwi.bmp"]);
        assert_eq!(registry.pick_food_skin(&mut rng), Some(SkinId::from("kiwi.bmp")));
    }

    #[test]
    fn test_missing_folder_is_created() {
        let folder = temp_folder();
        let registry = SkinRegistry::from_folder(&folder).unwrap();
        assert_eq!(registry, SkinRegistry::empty());
        assert!(folder.is_dir());

        std::fs::write(folder.join("default-body.png"), b"").unwrap();
        std::fs::write(folder.join("plum.jpeg"), b"").unwrap();
        let registry = SkinRegistry::from_folder(&folder).unwrap();
        assert_eq!(registry.default_body, Some(SkinId::from("default-body.png")));
        assert_eq!(registry.food_skins, vec![SkinId::from("plum.jpeg")]);

        std::fs::remove_dir_all(&folder).unwrap();
    }
}
