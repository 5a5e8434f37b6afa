//! Catalogue record types.
//!
//! A `PlantRecord` is one entry of the public catalogue, deserialized from
//! the JSON blobs the catalogue service stores verbatim from the
//! identification step. Every field beyond the two names is optional and
//! tolerated absent; the projections supply display fallbacks instead of
//! failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One catalogue entry with botanical and display metadata.
///
/// Immutable for the duration of a filter/sort/render cycle; the pipeline
/// only derives display values from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlantRecord {
    pub identified_name: String,
    pub scientific_name: String,
    #[serde(default)]
    pub candidate_identifications: Vec<CandidateIdentification>,
    #[serde(default)]
    pub reference_image: ReferenceImage,
    #[serde(default)]
    pub local_names: Option<Vec<LocalName>>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub fun_fact: Option<FunFact>,
    #[serde(default)]
    pub is_flowering: Option<bool>,
    #[serde(default)]
    pub is_medicinal: Option<bool>,
    #[serde(default)]
    pub is_edible: Option<bool>,
    #[serde(default)]
    pub is_toxic_to_pets: Option<bool>,
    #[serde(default)]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub care: Option<CareProfile>,
    #[serde(default)]
    pub origin_region: Option<String>,
    #[serde(default)]
    pub plant_personality: Option<String>,
    #[serde(default)]
    pub fragrance: Option<String>,
    #[serde(default)]
    pub symbolism: Option<String>,
    #[serde(default)]
    pub lifespan: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
}

/// One ranked identification candidate (up to 3 per record, descending
/// confidence, first candidate mirrors the primary identification).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateIdentification {
    pub identified_name: String,
    pub scientific_name: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// A vernacular name, optionally qualified by language and region.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalName {
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunFact {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Care attributes. `hardiness_zone` is carried from the upstream schema
/// but the detail care grid projects only the four fixed slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CareProfile {
    #[serde(default)]
    pub watering_frequency: Option<String>,
    #[serde(default)]
    pub sunlight_requirement: Option<String>,
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub growth_rate: Option<String>,
    #[serde(default)]
    pub hardiness_zone: Option<String>,
}

impl PlantRecord {
    /// Identification confidence, treating absent as zero.
    pub fn confidence_or_zero(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }

    /// `date_added` as a UTC timestamp. Absent or unparsable dates sort as
    /// the Unix epoch rather than erroring.
    pub fn date_added_or_epoch(&self) -> DateTime<Utc> {
        self.date_added
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// True if any local name contains `needle` (already lowercased),
    /// case-insensitively. Absent local names never match.
    pub fn local_name_matches(&self, needle: &str) -> bool {
        self.local_names
            .as_deref()
            .map(|names| {
                names
                    .iter()
                    .any(|ln| ln.name.to_lowercase().contains(needle))
            })
            .unwrap_or(false)
    }
}

/// Parse the loosely formatted `date_added` strings the catalogue carries.
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn deserializes_full_identification_blob() {
        let json = serde_json::json!({
            "candidate_identifications": [
                {"identified_name": "Swiss Cheese Plant", "scientific_name": "Monstera deliciosa", "confidence": 0.95},
                {"identified_name": "Split-leaf Philodendron", "scientific_name": "Thaumatophyllum bipinnatifidum", "confidence": 0.4}
            ],
            "identified_name": "Swiss Cheese Plant",
            "scientific_name": "Monstera deliciosa",
            "local_names": [
                {"name": "Fensterblatt", "language": "de", "region": "Germany", "confidence": 0.8}
            ],
            "confidence": 0.95,
            "fun_fact": {"text": "Its holes are called fenestrations.", "confidence": 0.9, "category": "botany"},
            "is_flowering": false,
            "is_medicinal": null,
            "is_edible": true,
            "is_toxic_to_pets": true,
            "plant_type": "houseplant",
            "environment": "indoor",
            "difficulty": "easy",
            "care": {
                "watering_frequency": "Weekly",
                "sunlight_requirement": "Bright indirect",
                "soil_type": "Well-draining",
                "growth_rate": "Fast",
                "hardiness_zone": "10-12"
            },
            "origin_region": "Central America",
            "plant_personality": "The Drama Queen",
            "fragrance": "none",
            "symbolism": "Longevity",
            "lifespan": "Perennial",
            "reference_image": {"url": "photos/monstera.jpg", "source": "public_upload", "license": "public"},
            "date_added": "2024-03-15T10:30:00Z"
        });

        let record: PlantRecord = serde_json::from_value(json).expect("blob should deserialize");
        assert_eq!(record.identified_name, "Swiss Cheese Plant");
        assert_eq!(record.candidate_identifications.len(), 2);
        assert_relative_eq!(record.confidence_or_zero(), 0.95);
        assert_eq!(record.is_medicinal, None);
        assert_eq!(record.is_edible, Some(true));
        assert_eq!(
            record.care.as_ref().and_then(|c| c.hardiness_zone.as_deref()),
            Some("10-12")
        );
    }

    #[test]
    fn tolerates_minimal_blob() {
        let json = serde_json::json!({
            "identified_name": "Unknown Fern",
            "scientific_name": "Polypodiopsida sp."
        });
        let record: PlantRecord = serde_json::from_value(json).expect("minimal blob");
        assert_relative_eq!(record.confidence_or_zero(), 0.0);
        assert_eq!(record.date_added_or_epoch(), DateTime::UNIX_EPOCH);
        assert!(!record.local_name_matches("fern"));
    }

    #[test]
    fn unparsable_date_sorts_as_epoch() {
        let record = PlantRecord {
            date_added: Some("sometime last spring".to_string()),
            ..Default::default()
        };
        assert_eq!(record.date_added_or_epoch(), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn bare_date_parses_to_midnight_utc() {
        let record = PlantRecord {
            date_added: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        let dt = record.date_added_or_epoch();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn local_name_matching_is_case_insensitive() {
        let record = PlantRecord {
            local_names: Some(vec![LocalName {
                name: "Monstera Deliciosa".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert!(record.local_name_matches("deliciosa"));
        assert!(!record.local_name_matches("aloe"));
    }
}
