//! View builder - converts catalogue records to view models.
//!
//! Pure projections: building a view model never mutates the source record
//! and never fails. Missing optional fields surface as the documented
//! fallback strings, not as errors.

use smallvec::SmallVec;

use crate::media::resolve_image_url;
use crate::record::PlantRecord;
use crate::view::view_models::*;

/// Placeholder shown when filtering leaves no records.
pub const EMPTY_GRID_MESSAGE: &str = "No plants found matching these filters.";

/// Fallback for records without local names.
pub const NO_LOCAL_NAMES: &str = "None known";

/// Fallback for absent origin, lifespan-free origin lines and care slots.
pub const UNKNOWN: &str = "Unknown";

/// Fallback fun-fact line.
pub const NO_FUN_FACT: &str = "No specific fun fact available.";

/// The identification step emits `""` for unknown string fields, so an
/// empty string counts as absent everywhere a fallback applies.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.as_str()).filter(|s| !s.is_empty())
}

// ============================================================================
// Card projection
// ============================================================================

/// Project one record to its card. `index` is the record's position in the
/// already-filtered-and-sorted sequence.
pub fn build_card(record: &PlantRecord, api_base_url: &str, index: usize) -> CardViewModel {
    let mut quick_icons: SmallVec<[QuickIcon; 4]> = SmallVec::new();
    // Fixed priority order: flowering, edible, medicinal, toxic.
    if record.is_flowering == Some(true) {
        quick_icons.push(QuickIcon::Flowering);
    }
    if record.is_edible == Some(true) {
        quick_icons.push(QuickIcon::Edible);
    }
    if record.is_medicinal == Some(true) {
        quick_icons.push(QuickIcon::Medicinal);
    }
    if record.is_toxic_to_pets == Some(true) {
        quick_icons.push(QuickIcon::Toxic);
    }

    CardViewModel {
        image_url: resolve_image_url(&record.reference_image.url, api_base_url),
        title: record.identified_name.clone(),
        subtitle: record.scientific_name.clone(),
        personality_badge: non_empty(record.plant_personality.as_ref()).map(str::to_string),
        confidence_badge: record
            .confidence
            .filter(|c| *c > 0.0)
            .map(ConfidenceBadge::from_confidence),
        quick_icons,
        animation_order: index,
    }
}

/// Project an ordered subset to the grid, or to the designated empty-state
/// placeholder when nothing survived filtering.
pub fn build_grid(records: &[&PlantRecord], api_base_url: &str) -> GridViewModel {
    if records.is_empty() {
        return GridViewModel::Empty {
            message: EMPTY_GRID_MESSAGE,
        };
    }
    GridViewModel::Cards(
        records
            .iter()
            .enumerate()
            .map(|(index, record)| build_card(record, api_base_url, index))
            .collect(),
    )
}

// ============================================================================
// Detail projection
// ============================================================================

/// Project one record to the expanded detail view.
pub fn build_detail(record: &PlantRecord, api_base_url: &str) -> DetailViewModel {
    // Badges in fixed order: personality, flowering, edible, medicinal, toxic.
    let mut badges: SmallVec<[DetailBadge; 5]> = SmallVec::new();
    if let Some(personality) = non_empty(record.plant_personality.as_ref()) {
        badges.push(DetailBadge::Personality(personality.to_string()));
    }
    if record.is_flowering == Some(true) {
        badges.push(DetailBadge::Flowering);
    }
    if record.is_edible == Some(true) {
        badges.push(DetailBadge::Edible);
    }
    if record.is_medicinal == Some(true) {
        badges.push(DetailBadge::Medicinal);
    }
    if record.is_toxic_to_pets == Some(true) {
        badges.push(DetailBadge::ToxicToPets);
    }

    let local_names_text = record
        .local_names
        .as_deref()
        .map(|names| {
            names
                .iter()
                .map(|ln| ln.name.as_str())
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| NO_LOCAL_NAMES.to_string());

    let origin = non_empty(record.origin_region.as_ref()).unwrap_or(UNKNOWN);
    let origin_text = match non_empty(record.lifespan.as_ref()) {
        Some(lifespan) => format!("{} • {}", origin, lifespan),
        None => origin.to_string(),
    };

    let fun_fact_text = record
        .fun_fact
        .as_ref()
        .map(|f| f.text.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_FUN_FACT.to_string());

    DetailViewModel {
        image_url: resolve_image_url(&record.reference_image.url, api_base_url),
        title: record.identified_name.clone(),
        subtitle: record.scientific_name.clone(),
        badges,
        local_names_text,
        origin_text,
        fun_fact_text,
        care_grid: build_care_grid(record),
        symbolism: non_empty(record.symbolism.as_ref()).map(str::to_string),
    }
}

/// The four fixed care slots: Water, Sun, Soil, Growth.
fn build_care_grid(record: &PlantRecord) -> [CareSlot; 4] {
    let care = record.care.as_ref();
    let slot = |label, icon, value: Option<&String>| CareSlot {
        label,
        icon,
        value: non_empty(value).unwrap_or(UNKNOWN).to_string(),
    };
    [
        slot("Water", "💧", care.and_then(|c| c.watering_frequency.as_ref())),
        slot("Sun", "☀️", care.and_then(|c| c.sunlight_requirement.as_ref())),
        slot("Soil", "🪴", care.and_then(|c| c.soil_type.as_ref())),
        slot("Growth", "📈", care.and_then(|c| c.growth_rate.as_ref())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CareProfile, FunFact, LocalName, ReferenceImage};

    fn full_record() -> PlantRecord {
        PlantRecord {
            identified_name: "Monstera".to_string(),
            scientific_name: "Monstera deliciosa".to_string(),
            reference_image: ReferenceImage {
                url: "photos/monstera.jpg".to_string(),
                ..Default::default()
            },
            local_names: Some(vec![
                LocalName {
                    name: "Fensterblatt".to_string(),
                    ..Default::default()
                },
                LocalName {
                    name: "Ceriman".to_string(),
                    ..Default::default()
                },
            ]),
            confidence: Some(0.95),
            fun_fact: Some(FunFact {
                text: "Its holes are called fenestrations.".to_string(),
                ..Default::default()
            }),
            is_flowering: Some(false),
            is_medicinal: Some(true),
            is_edible: Some(true),
            is_toxic_to_pets: Some(true),
            care: Some(CareProfile {
                watering_frequency: Some("Weekly".to_string()),
                sunlight_requirement: Some("Bright indirect".to_string()),
                soil_type: None,
                growth_rate: Some("Fast".to_string()),
                hardiness_zone: Some("10-12".to_string()),
            }),
            origin_region: Some("Central America".to_string()),
            plant_personality: Some("The Drama Queen".to_string()),
            symbolism: Some("Longevity".to_string()),
            lifespan: Some("Perennial".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn card_projects_badges_and_icons_in_priority_order() {
        let record = full_record();
        let card = build_card(&record, "https://api.example.com", 3);

        assert_eq!(card.image_url, "thumbnails/monstera.jpg");
        assert_eq!(card.title, "Monstera");
        assert_eq!(card.subtitle, "Monstera deliciosa");
        assert_eq!(card.personality_badge.as_deref(), Some("The Drama Queen"));
        // Flowering is false, so the subset starts at edible.
        assert_eq!(
            card.quick_icons.as_slice(),
            [QuickIcon::Edible, QuickIcon::Medicinal, QuickIcon::Toxic]
        );
        assert_eq!(card.animation_order, 3);
        assert_eq!(card.animation_delay_ms(), 150);
    }

    #[test]
    fn confidence_tier_boundary_sits_at_rounded_ninety() {
        let high = ConfidenceBadge::from_confidence(0.896);
        assert_eq!(high.percent, 90);
        assert_eq!(high.tier, ConfidenceTier::High);

        let low = ConfidenceBadge::from_confidence(0.894);
        assert_eq!(low.percent, 89);
        assert_eq!(low.tier, ConfidenceTier::Low);
    }

    #[test]
    fn card_without_confidence_has_no_ring() {
        let mut record = full_record();
        record.confidence = None;
        let card = build_card(&record, "https://api.example.com", 0);
        assert!(card.confidence_badge.is_none());
    }

    #[test]
    fn empty_grid_projects_placeholder() {
        let grid = build_grid(&[], "https://api.example.com");
        assert_eq!(grid.card_count(), 0);
        match grid {
            GridViewModel::Empty { message } => assert_eq!(message, EMPTY_GRID_MESSAGE),
            GridViewModel::Cards(_) => panic!("expected the empty-state placeholder"),
        }
    }

    #[test]
    fn grid_preserves_order_and_indexes_cards() {
        let a = full_record();
        let mut b = full_record();
        b.identified_name = "Aloe".to_string();
        let grid = build_grid(&[&a, &b], "https://api.example.com");
        match grid {
            GridViewModel::Cards(cards) => {
                assert_eq!(cards[0].title, "Monstera");
                assert_eq!(cards[1].title, "Aloe");
                assert_eq!(cards[1].animation_order, 1);
            }
            GridViewModel::Empty { .. } => panic!("expected cards"),
        }
    }

    #[test]
    fn detail_badges_follow_fixed_order() {
        let detail = build_detail(&full_record(), "https://api.example.com");
        assert_eq!(
            detail.badges.as_slice(),
            [
                DetailBadge::Personality("The Drama Queen".to_string()),
                DetailBadge::Edible,
                DetailBadge::Medicinal,
                DetailBadge::ToxicToPets,
            ]
        );
    }

    #[test]
    fn detail_joins_local_names() {
        let detail = build_detail(&full_record(), "https://api.example.com");
        assert_eq!(detail.local_names_text, "Fensterblatt, Ceriman");
    }

    #[test]
    fn detail_falls_back_for_missing_fields() {
        let record = PlantRecord {
            identified_name: "Mystery".to_string(),
            scientific_name: "Plantae incognita".to_string(),
            local_names: Some(vec![]),
            ..Default::default()
        };
        let detail = build_detail(&record, "https://api.example.com");

        assert_eq!(detail.local_names_text, NO_LOCAL_NAMES);
        assert_eq!(detail.origin_text, UNKNOWN);
        assert_eq!(detail.fun_fact_text, NO_FUN_FACT);
        assert!(detail.badges.is_empty());
        assert!(detail.symbolism.is_none());
        for slot in &detail.care_grid {
            assert_eq!(slot.value, UNKNOWN);
        }
    }

    #[test]
    fn empty_strings_count_as_absent() {
        // The identification step emits "" for unknown string fields.
        let record = PlantRecord {
            identified_name: "Sparse".to_string(),
            scientific_name: "Sparsa incognita".to_string(),
            plant_personality: Some(String::new()),
            symbolism: Some(String::new()),
            origin_region: Some(String::new()),
            lifespan: Some(String::new()),
            confidence: Some(0.0),
            fun_fact: Some(FunFact::default()),
            local_names: Some(vec![LocalName::default()]),
            ..Default::default()
        };

        let card = build_card(&record, "https://api.example.com", 0);
        assert!(card.personality_badge.is_none());
        assert!(card.confidence_badge.is_none(), "zero confidence shows no ring");

        let detail = build_detail(&record, "https://api.example.com");
        assert!(detail.badges.is_empty());
        assert!(detail.symbolism.is_none());
        assert_eq!(detail.origin_text, UNKNOWN);
        assert_eq!(detail.local_names_text, NO_LOCAL_NAMES);
        assert_eq!(detail.fun_fact_text, NO_FUN_FACT);
    }

    #[test]
    fn origin_appends_lifespan_when_present() {
        let detail = build_detail(&full_record(), "https://api.example.com");
        assert_eq!(detail.origin_text, "Central America • Perennial");
    }

    #[test]
    fn care_grid_is_always_four_slots_in_order() {
        let detail = build_detail(&full_record(), "https://api.example.com");
        let labels: Vec<&str> = detail.care_grid.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Water", "Sun", "Soil", "Growth"]);
        assert_eq!(detail.care_grid[0].value, "Weekly");
        assert_eq!(detail.care_grid[2].value, UNKNOWN); // soil_type absent
    }

    #[test]
    fn card_and_detail_resolve_images_identically() {
        let mut record = full_record();
        record.reference_image.url = "http://localhost:8001/uploads/m.jpg".to_string();
        let base = "https://api.example.com";
        let card = build_card(&record, base, 0);
        let detail = build_detail(&record, base);
        assert_eq!(card.image_url, detail.image_url);
        assert_eq!(card.image_url, "https://api.example.com/uploads/m.jpg");
    }

    #[test]
    fn projection_does_not_mutate_the_record() {
        let record = full_record();
        let before = serde_json::to_value(&record).unwrap();
        let _ = build_card(&record, "https://api.example.com", 0);
        let _ = build_detail(&record, "https://api.example.com");
        let after = serde_json::to_value(&record).unwrap();
        assert_eq!(before, after);
    }
}
