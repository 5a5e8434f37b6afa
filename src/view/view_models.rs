//! View models for the catalogue UI.
//!
//! Plain derived structures describing what to render, independent of any
//! rendering technology. The builders in `view_builder` are the only
//! producers; the askama templates and the JSON API are consumers. Badge
//! and icon decisions live here as enumerated kinds with presentation
//! accessors, never as pre-concatenated markup.

use serde::Serialize;
use smallvec::SmallVec;

// ============================================================================
// Card grid
// ============================================================================

/// Quick-fact icons on a card footer, in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuickIcon {
    Flowering,
    Edible,
    Medicinal,
    Toxic,
}

impl QuickIcon {
    pub fn label(&self) -> &'static str {
        match self {
            QuickIcon::Flowering => "Flowering",
            QuickIcon::Edible => "Edible",
            QuickIcon::Medicinal => "Medicinal",
            QuickIcon::Toxic => "Toxic",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            QuickIcon::Flowering => "🌸",
            QuickIcon::Edible => "🥗",
            QuickIcon::Medicinal => "💊",
            QuickIcon::Toxic => "⚠️",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            QuickIcon::Flowering => "bg-pink-50 text-pink-600",
            QuickIcon::Edible => "bg-amber-50 text-amber-600",
            QuickIcon::Medicinal => "bg-blue-50 text-blue-600",
            QuickIcon::Toxic => "bg-red-50 text-red-600",
        }
    }
}

/// Confidence ring tier. High reads green, low reads amber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceTier {
    High,
    Low,
}

impl ConfidenceTier {
    pub fn css_class(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "border-emerald-500 text-emerald-600",
            ConfidenceTier::Low => "border-amber-500 text-amber-600",
        }
    }
}

/// Confidence ring badge on a card's image corner.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfidenceBadge {
    /// Rounded percentage, 0-100.
    pub percent: u8,
    pub tier: ConfidenceTier,
}

impl ConfidenceBadge {
    /// High tier starts at a rounded 90%.
    pub fn from_confidence(confidence: f64) -> Self {
        let percent = (confidence * 100.0).round().clamp(0.0, 100.0) as u8;
        let tier = if percent >= 90 {
            ConfidenceTier::High
        } else {
            ConfidenceTier::Low
        };
        ConfidenceBadge { percent, tier }
    }
}

/// Summary projection of one record for the card grid.
#[derive(Debug, Clone, Serialize)]
pub struct CardViewModel {
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    pub personality_badge: Option<String>,
    pub confidence_badge: Option<ConfidenceBadge>,
    pub quick_icons: SmallVec<[QuickIcon; 4]>,
    /// Position in the filtered-and-sorted sequence. Presentation
    /// staggering only, no semantics.
    pub animation_order: usize,
}

impl CardViewModel {
    /// Staggered list animation delay.
    pub fn animation_delay_ms(&self) -> usize {
        self.animation_order * 50
    }
}

/// The rendered grid: either the designated empty-state placeholder or a
/// sequence of cards. Never an error state.
#[derive(Debug, Clone, Serialize)]
pub enum GridViewModel {
    Empty { message: &'static str },
    Cards(Vec<CardViewModel>),
}

impl GridViewModel {
    pub fn card_count(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GridViewModel::Empty { .. })
    }

    /// Placeholder text; empty for a populated grid.
    pub fn message(&self) -> &str {
        match self {
            GridViewModel::Empty { message } => message,
            GridViewModel::Cards(_) => "",
        }
    }

    pub fn cards(&self) -> &[CardViewModel] {
        match self {
            GridViewModel::Empty { .. } => &[],
            GridViewModel::Cards(cards) => cards,
        }
    }
}

// ============================================================================
// Detail panel
// ============================================================================

/// Detail header badges, built in fixed order: personality first, then the
/// classification flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DetailBadge {
    Personality(String),
    Flowering,
    Edible,
    Medicinal,
    ToxicToPets,
}

impl DetailBadge {
    pub fn text(&self) -> String {
        match self {
            DetailBadge::Personality(p) => format!("🎭 {}", p),
            DetailBadge::Flowering => "🌸 Flowering".to_string(),
            DetailBadge::Edible => "🥗 Edible".to_string(),
            DetailBadge::Medicinal => "💊 Medicinal".to_string(),
            DetailBadge::ToxicToPets => "⚠️ Toxic to Pets".to_string(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DetailBadge::Personality(_) => "bg-terracotta text-white",
            DetailBadge::Flowering => "bg-pink-100 text-pink-700",
            DetailBadge::Edible => "bg-amber-100 text-amber-700",
            DetailBadge::Medicinal => "bg-blue-100 text-blue-700",
            DetailBadge::ToxicToPets => "bg-red-100 text-red-700",
        }
    }
}

/// One slot of the care grid.
#[derive(Debug, Clone, Serialize)]
pub struct CareSlot {
    pub label: &'static str,
    pub icon: &'static str,
    pub value: String,
}

/// Expanded projection of one record for the detail panel.
#[derive(Debug, Clone, Serialize)]
pub struct DetailViewModel {
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    pub badges: SmallVec<[DetailBadge; 5]>,
    pub local_names_text: String,
    pub origin_text: String,
    pub fun_fact_text: String,
    /// Exactly four slots, always: Water, Sun, Soil, Growth.
    pub care_grid: [CareSlot; 4],
    /// `None` omits the symbolism panel entirely.
    pub symbolism: Option<String>,
}
