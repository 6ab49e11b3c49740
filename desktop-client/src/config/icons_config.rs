use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct IconsConfig {
    /// Folder scanned for `default-body.png` and food icons.
    pub folder: String,
    /// Face captures drawn on the snake heads.
    #[serde(default)]
    pub player1_face: Option<String>,
    #[serde(default)]
    pub player2_face: Option<String>,
}

impl Validate for IconsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.folder.trim().is_empty() {
            return Err("icons folder must not be empty".to_string());
        }
        for face in [&self.player1_face, &self.player2_face].into_iter().flatten() {
            if face.trim().is_empty() {
                return Err("face image must not be empty if provided".to_string());
            }
        }
        Ok(())
    }
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            folder: "icons".to_string(),
            player1_face: None,
            player2_face: None,
        }
    }
}
