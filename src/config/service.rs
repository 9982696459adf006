use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Low temperature biases the model toward precise numeric output.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Generation-service tuning, optionally loaded from a TOML file.
/// Missing fields fall back to the defaults above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_endpoint")]
    pub api_endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            api_endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

impl ServiceSettings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: ServiceSettings =
            toml::from_str(&content).map_err(|e| EstimateError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            })?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for ServiceSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        validate_range("temperature", self.temperature, 0.0, 2.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.model, "gemini-2.5-flash");
        assert_eq!(settings.temperature, 0.2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let settings: ServiceSettings = toml::from_str(r#"model = "gemini-2.0-pro""#).unwrap();
        assert_eq!(settings.model, "gemini-2.0-pro");
        assert_eq!(settings.api_endpoint, DEFAULT_API_ENDPOINT);
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ServiceSettings {
            api_endpoint: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ServiceSettings {
            temperature: 5.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        std::fs::write(
            &path,
            "api_endpoint = \"https://example.com/v1beta\"\ntemperature = 0.1\n",
        )
        .unwrap();

        let settings = ServiceSettings::from_file(&path).unwrap();
        assert_eq!(settings.api_endpoint, "https://example.com/v1beta");
        assert_eq!(settings.temperature, 0.1);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }
}
