/// Application settings
///
/// Settings are read once at start-up from an optional JSON file:
/// - Linux: ~/.config/unit-catalog/config.json
/// - macOS: ~/Library/Application Support/unit-catalog/config.json
/// - Windows: %APPDATA%\unit-catalog\config.json
///
/// Every field has a default, so a partial file is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::ConfigError;

/// File name the catalog is looked up under
pub const CATALOG_FILE: &str = "apartments.json";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Window and header title
    pub title: String,
    /// First place `apartments.json` is looked for
    pub data_root: PathBuf,
    /// Phone number (international, digits only) for the contact link
    pub contact_phone: String,
    /// Contact message; `{id}` is replaced by the unit identifier
    pub contact_template: String,
    /// Header logo, looked up next to the catalog
    pub logo_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Torre Élite · Disponibilidad de apartamentos".to_string(),
            data_root: default_data_root(),
            contact_phone: "50492513691".to_string(),
            contact_template: "Hola, me interesa el apartamento {id} de Torre Élite".to_string(),
            logo_file: "logo-honduras-constructores.png".to_string(),
        }
    }
}

impl AppConfig {
    /// Load settings from the user's config directory.
    /// A missing file means defaults; a broken one is reported and ignored.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::read(&path) {
            Ok(config) => {
                info!("⚙️  Settings loaded from {}", path.display());
                config
            }
            Err(err) => {
                warn!("⚠️  Ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get the path where the settings file is expected
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_default();

        path.push("unit-catalog");
        path.push("config.json");
        path
    }

    /// Catalog locations, in the order they are tried
    pub fn catalog_candidates(&self) -> Vec<PathBuf> {
        vec![
            self.data_root.join(CATALOG_FILE),
            PathBuf::from("public").join(CATALOG_FILE),
            PathBuf::from(CATALOG_FILE),
        ]
    }

    /// The header logo under `asset_root`, if that file exists
    pub fn logo_path(&self, asset_root: &Path) -> Option<PathBuf> {
        let path = asset_root.join(self.logo_file.trim_start_matches('/'));
        path.is_file().then_some(path)
    }
}

/// ~/.local/share/unit-catalog (or the working directory if unknown)
fn default_data_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("unit-catalog"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"contact_phone":"15550100"}"#).unwrap();
        assert_eq!(config.contact_phone, "15550100");
        assert_eq!(config.title, AppConfig::default().title);
        assert_eq!(config.contact_template, AppConfig::default().contact_template);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(AppConfig::from_json("{ title: nope").is_err());
        assert!(AppConfig::read(Path::new("/nonexistent/unit-catalog/config.json")).is_err());
    }

    #[test]
    fn test_logo_only_when_present() {
        let dir = std::env::temp_dir()
            .join("unit-catalog-tests")
            .join(format!("logo-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let logo = dir.join("logo-honduras-constructores.png");
        let _ = std::fs::remove_file(&logo);

        let config = AppConfig::default();
        assert_eq!(config.logo_path(&dir), None);

        std::fs::write(&logo, b"not checked here").unwrap();
        assert_eq!(config.logo_path(&dir), Some(logo));
    }

    #[test]
    fn test_candidate_order() {
        let config = AppConfig {
            data_root: PathBuf::from("/srv/catalog"),
            ..Default::default()
        };
        assert_eq!(
            config.catalog_candidates(),
            vec![
                PathBuf::from("/srv/catalog/apartments.json"),
                PathBuf::from("public/apartments.json"),
                PathBuf::from("apartments.json"),
            ]
        );
    }
}
