pub mod service;

use crate::domain::model::{BuildingType, Location, MaterialQuality, ProjectDetails};
use crate::domain::ports::ServiceConfig;
use crate::utils::error::Result;
use clap::Parser;
use service::ServiceSettings;
use std::path::PathBuf;

/// CLI surface mirroring the estimation form: one flag per field,
/// defaults matching the form's initial state.
#[derive(Debug, Clone, Parser)]
#[command(name = "rab-estimator")]
#[command(about = "Estimator RAB bangunan berbasis AI untuk proyek konstruksi di Bali")]
pub struct CliConfig {
    #[arg(long, required_unless_present = "list_note_suggestions")]
    pub project_name: Option<String>,

    #[arg(long, value_enum, default_value = "denpasar")]
    pub location: Location,

    /// Luas tanah dalam m2.
    #[arg(long, default_value = "100")]
    pub land_area: f64,

    /// Luas bangunan dalam m2.
    #[arg(long, default_value = "60")]
    pub building_area: f64,

    #[arg(long, default_value = "1")]
    pub floors: u32,

    #[arg(long, value_enum, default_value = "residential")]
    pub building_type: BuildingType,

    /// Required when --building-type is 'other'.
    #[arg(long)]
    pub custom_building_type: Option<String>,

    #[arg(long, value_enum, default_value = "standard")]
    pub quality: MaterialQuality,

    /// Catatan teknis bebas.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Quick-insert phrase appended to the notes; repeatable.
    #[arg(long = "note")]
    pub note_tags: Vec<String>,

    /// Print the canonical note suggestions and exit.
    #[arg(long)]
    pub list_note_suggestions: bool,

    /// Google Gemini API key; falls back to the GEMINI_API_KEY
    /// environment variable.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Optional TOML file with generation-service settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Assembles the project details, joining quick-insert phrases to
    /// the free-text notes the way the form's suggestion buttons do.
    pub fn project_details(&self) -> ProjectDetails {
        let mut notes = self.notes.trim().to_string();
        for tag in &self.note_tags {
            if !notes.is_empty() {
                notes.push_str(", ");
            }
            notes.push_str(tag.trim());
        }

        ProjectDetails {
            project_name: self.project_name.clone().unwrap_or_default(),
            location: self.location,
            land_area: self.land_area,
            building_area: self.building_area,
            floors: self.floors,
            building_type: self.building_type,
            custom_building_type: self.custom_building_type.clone(),
            quality: self.quality,
            notes,
        }
    }

    /// Loads service settings from the optional TOML file, defaults
    /// otherwise.
    pub fn resolve(&self) -> Result<AppConfig> {
        let settings = match &self.config {
            Some(path) => ServiceSettings::from_file(path)?,
            None => ServiceSettings::default(),
        };
        Ok(AppConfig {
            settings,
            output_path: self.output_path.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: ServiceSettings,
    pub output_path: String,
}

impl ServiceConfig for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.settings.api_endpoint
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn temperature(&self) -> f32 {
        self.settings.temperature
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_tags_join_like_suggestion_buttons() {
        let config = CliConfig::parse_from([
            "rab-estimator",
            "--project-name",
            "Villa Ubud View",
            "--notes",
            "Konsep Bali Tropis",
            "--note",
            "Ada Kolam Renang",
            "--note",
            "Pagar Keliling",
        ]);

        let details = config.project_details();
        assert_eq!(
            details.notes,
            "Konsep Bali Tropis, Ada Kolam Renang, Pagar Keliling"
        );
    }

    #[test]
    fn test_note_tags_without_base_notes() {
        let config = CliConfig::parse_from([
            "rab-estimator",
            "--project-name",
            "Villa",
            "--note",
            "Taman Landscape",
        ]);
        assert_eq!(config.project_details().notes, "Taman Landscape");
    }

    #[test]
    fn test_form_defaults() {
        let config = CliConfig::parse_from(["rab-estimator", "--project-name", "Rumah Contoh"]);
        let details = config.project_details();

        assert_eq!(details.location, Location::Denpasar);
        assert_eq!(details.land_area, 100.0);
        assert_eq!(details.building_area, 60.0);
        assert_eq!(details.floors, 1);
        assert_eq!(details.building_type, BuildingType::Residential);
        assert_eq!(details.quality, MaterialQuality::Standard);
    }

    #[test]
    fn test_resolve_defaults_without_config_file() {
        let config = CliConfig::parse_from(["rab-estimator", "--project-name", "Rumah"]);
        let app = config.resolve().unwrap();
        assert_eq!(app.model(), "gemini-2.5-flash");
        assert_eq!(app.temperature(), 0.2);
        assert_eq!(app.output_path(), "./output");
    }
}
