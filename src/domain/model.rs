use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_number, validate_range, Validate,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Quick-insert phrases offered alongside the free-text notes field.
pub const NOTE_SUGGESTIONS: [&str; 10] = [
    "Pondasi Cakar Ayam",
    "Rangka Atap Baja Ringan",
    "Ada Kolam Renang",
    "Lantai Granit 60x60",
    "Kamar Mandi Dalam (Ensuite)",
    "Pagar Keliling",
    "Konsep Minimalis Modern",
    "Konsep Bali Tropis",
    "Banyak Bukaan Kaca",
    "Taman Landscape",
];

/// The nine Bali regencies (kabupaten/kota) a project can be located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Location {
    Badung,
    Denpasar,
    Gianyar,
    Tabanan,
    Buleleng,
    Jembrana,
    Bangli,
    Klungkung,
    Karangasem,
}

impl Location {
    pub fn label(&self) -> &'static str {
        match self {
            Location::Badung => "Badung",
            Location::Denpasar => "Denpasar",
            Location::Gianyar => "Gianyar",
            Location::Tabanan => "Tabanan",
            Location::Buleleng => "Buleleng",
            Location::Jembrana => "Jembrana",
            Location::Bangli => "Bangli",
            Location::Klungkung => "Klungkung",
            Location::Karangasem => "Karangasem",
        }
    }

    /// Fixed location markup applied to base unit prices, in percent.
    /// Badung/Denpasar carry the highest living and logistics costs.
    pub fn markup_percent(&self) -> u32 {
        match self {
            Location::Badung | Location::Denpasar => 10,
            Location::Gianyar | Location::Tabanan => 5,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum BuildingType {
    Residential,
    Villa,
    Kost,
    Apartment,
    Office,
    Commercial,
    Warehouse,
    Other,
}

impl BuildingType {
    pub fn label(&self) -> &'static str {
        match self {
            BuildingType::Residential => "Rumah Tinggal",
            BuildingType::Villa => "Villa Private/Komersial",
            BuildingType::Kost => "Rumah Kost (Boarding House)",
            BuildingType::Apartment => "Apartemen Low-Rise",
            BuildingType::Office => "Kantor",
            BuildingType::Commercial => "Ruko/Toko",
            BuildingType::Warehouse => "Gudang",
            BuildingType::Other => "Lainnya (Custom)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum MaterialQuality {
    Budget,
    Standard,
    Premium,
}

impl MaterialQuality {
    pub fn label(&self) -> &'static str {
        match self {
            MaterialQuality::Budget => "Ekonomis",
            MaterialQuality::Standard => "Standar",
            MaterialQuality::Premium => "Mewah",
        }
    }
}

/// One form submission. Held only for the duration of a single
/// estimation run, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub project_name: String,
    pub location: Location,
    /// Land area in m2.
    pub land_area: f64,
    /// Building area in m2.
    pub building_area: f64,
    pub floors: u32,
    pub building_type: BuildingType,
    pub custom_building_type: Option<String>,
    pub quality: MaterialQuality,
    pub notes: String,
}

impl ProjectDetails {
    /// The building-type label embedded in the prompt: the custom text
    /// when `Other` is selected, otherwise the enumerated label.
    pub fn effective_building_type(&self) -> &str {
        match (self.building_type, &self.custom_building_type) {
            (BuildingType::Other, Some(custom)) if !custom.trim().is_empty() => custom,
            _ => self.building_type.label(),
        }
    }
}

impl Validate for ProjectDetails {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("project_name", &self.project_name)?;
        validate_non_negative_number("land_area", self.land_area)?;
        validate_non_negative_number("building_area", self.building_area)?;
        validate_range("floors", self.floors, 1, 10)?;

        if self.building_type == BuildingType::Other {
            let custom = self.custom_building_type.as_deref().unwrap_or("");
            if custom.trim().is_empty() {
                return Err(EstimateError::ValidationError {
                    field: "custom_building_type".to_string(),
                    reason: "Building type 'Lainnya (Custom)' requires a description".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// A fully built generation request: the QS instruction prompt and the
/// response schema the service must conform to. Pure data, no I/O.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: serde_json::Value,
}

/// One budget line item as returned by the generation service. Field
/// names follow the service's camelCase JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RabItem {
    pub description: String,
    /// Unit of measure (m2, m3, kg, bh, ls, unit).
    pub unit: String,
    pub volume: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// A work-stage category, conventionally named with a Roman numeral
/// prefix ("II. Pekerjaan Tanah"). Item order is kept as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RabCategory {
    pub category_name: String,
    pub items: Vec<RabItem>,
    /// Displayed as provided; never recomputed from the items.
    pub subtotal: f64,
}

/// The full estimate as parsed from the generation service. Immutable
/// after creation; display views are derived, not written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RabResult {
    pub project_summary: String,
    pub categories: Vec<RabCategory>,
    /// Inclusive of 11% PPN.
    pub grand_total: f64,
    pub estimated_duration: String,
}

/// Display-ready view of a [`RabResult`]: categories in canonical
/// order plus reconciled derived totals.
#[derive(Debug, Clone)]
pub struct NormalizedEstimate {
    pub project_summary: String,
    pub categories: Vec<RabCategory>,
    pub grand_total: f64,
    pub estimated_duration: String,
    /// Sum of category subtotals (biaya fisik), exclusive of tax.
    pub construction_cost: f64,
    /// `grand_total - construction_cost`; may be negative if the
    /// service returned inconsistent numbers.
    pub tax_amount: f64,
}
