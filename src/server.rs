//! Axum server module.
//!
//! Wires the pure pipeline to its impure collaborators: the catalogue
//! service (input), the HTTP query parameters (query inputs), and the
//! askama templates (render target). JSON endpoints mirror the catalogue
//! service's own surface so the records stay inspectable as data.

#[cfg(feature = "web")]
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

#[cfg(feature = "web")]
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

#[cfg(feature = "web")]
use moka::future::Cache;

#[cfg(feature = "web")]
use std::sync::Arc;

#[cfg(feature = "web")]
use std::time::Duration;

#[cfg(feature = "web")]
use crate::client::CatalogueSource;

#[cfg(feature = "web")]
use crate::query::{AttributeKey, QuerySnapshot, SortMode};

#[cfg(feature = "web")]
use crate::record::PlantRecord;

#[cfg(feature = "web")]
use crate::web::handlers::pages;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "web")]
#[derive(Clone)]
pub struct AppState {
    /// The catalogue array, fetched once at startup and shared immutably.
    pub records: Arc<Vec<PlantRecord>>,
    /// Base URL the Record Normalizer rewrites stale dev URLs against.
    pub api_base_url: String,
    /// Rendered grid fragments keyed by normalized query string.
    pub grid_cache: Cache<String, String>,
}

#[cfg(feature = "web")]
impl AppState {
    pub async fn new(source: CatalogueSource, api_base_url: &str) -> anyhow::Result<Self> {
        tracing::info!("Loading catalogue...");
        let records = source.load().await?;
        tracing::info!("Catalogue ready ({} records)", records.len());

        let grid_cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Ok(Self {
            records: Arc::new(records),
            api_base_url: api_base_url.to_string(),
            grid_cache,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "web")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Pages and fragments (HTML)
        .route("/", get(pages::catalogue_page))
        .route("/catalogue", get(pages::catalogue_grid))
        .route("/plants/:index", get(pages::plant_detail))
        // Record endpoints (JSON API, mirroring the catalogue service)
        .route("/api/plants", get(list_plants))
        .route("/api/plants/:index", get(get_plant))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Query input collaborator
// ============================================================================

/// Wire form of the filter/sort controls. Unknown attribute keys and sort
/// modes are ignored, matching the pipeline's graceful-degradation rule.
#[cfg(feature = "web")]
#[derive(Debug, Default, serde::Deserialize)]
pub struct CatalogueQuery {
    pub q: Option<String>,
    /// Comma-separated attribute keys, e.g. `is_edible,is_flowering`.
    pub attrs: Option<String>,
    pub min_conf: Option<f64>,
    pub sort: Option<String>,
}

#[cfg(feature = "web")]
impl CatalogueQuery {
    /// Capture the controls into one pipeline snapshot.
    pub fn snapshot(&self) -> QuerySnapshot {
        let required_attributes = self
            .attrs
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter_map(|key| AttributeKey::parse(key.trim()))
            .collect();

        QuerySnapshot {
            search: self.q.clone().unwrap_or_default(),
            required_attributes,
            min_confidence: self.min_conf.unwrap_or(0.0),
            sort: self.sort.as_deref().and_then(SortMode::parse),
        }
    }

    /// Canonical cache key for the rendered grid fragment.
    pub fn cache_key(&self) -> String {
        let snapshot = self.snapshot();
        let mut attrs: Vec<&str> = snapshot
            .required_attributes
            .iter()
            .map(|k| k.as_str())
            .collect();
        attrs.sort_unstable();
        format!(
            "grid:{}|{}|{}|{}",
            snapshot.search.trim().to_lowercase(),
            attrs.join(","),
            snapshot.min_confidence,
            snapshot.sort.map(|m| m.as_str()).unwrap_or("")
        )
    }
}

// ============================================================================
// JSON Endpoint Handlers
// ============================================================================

#[cfg(feature = "web")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "web")]
async fn list_plants(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "rows": state.records.len(),
        "data": &*state.records,
    }))
}

#[cfg(feature = "web")]
async fn get_plant(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<PlantRecord>, AppError> {
    state
        .records
        .get(index)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", index)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "web")]
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("template rendering failed: {0}")]
    Template(String),
    #[error("{0}")]
    Internal(String),
}

#[cfg(feature = "web")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(all(test, feature = "web"))]
mod tests {
    use super::*;

    #[test]
    fn query_parsing_ignores_unknown_keys_and_modes() {
        let query = CatalogueQuery {
            q: Some("fic".to_string()),
            attrs: Some("is_edible, is_sentient ,is_flowering".to_string()),
            min_conf: Some(0.5),
            sort: Some("by_vibes".to_string()),
        };
        let snapshot = query.snapshot();
        assert_eq!(snapshot.required_attributes.len(), 2);
        assert!(snapshot.required_attributes.contains(&AttributeKey::Edible));
        assert!(snapshot
            .required_attributes
            .contains(&AttributeKey::Flowering));
        assert_eq!(snapshot.sort, None);
    }

    #[test]
    fn cache_key_is_order_insensitive_for_attributes() {
        let a = CatalogueQuery {
            attrs: Some("is_edible,is_flowering".to_string()),
            ..Default::default()
        };
        let b = CatalogueQuery {
            attrs: Some("is_flowering,is_edible".to_string()),
            ..Default::default()
        };
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn cache_key_normalizes_search_text() {
        let a = CatalogueQuery {
            q: Some("  FICUS ".to_string()),
            ..Default::default()
        };
        let b = CatalogueQuery {
            q: Some("ficus".to_string()),
            ..Default::default()
        };
        assert_eq!(a.cache_key(), b.cache_key());
    }
}
