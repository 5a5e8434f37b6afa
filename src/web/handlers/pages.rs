// Page and fragment handlers for HTML rendering with Askama

#[cfg(feature = "web")]
use askama::Template;

#[cfg(feature = "web")]
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse},
};

#[cfg(feature = "web")]
use axum_htmx::HxRequest;

#[cfg(feature = "web")]
use crate::query::{filter_and_sort, AttributeKey, QuerySnapshot};

#[cfg(feature = "web")]
use crate::server::{AppError, AppState, CatalogueQuery};

#[cfg(feature = "web")]
use crate::view::view_builder::{build_detail, build_grid};

#[cfg(feature = "web")]
use crate::view::view_models::{CardViewModel, DetailViewModel, GridViewModel};

#[cfg(feature = "web")]
use crate::record::PlantRecord;

// ============================================================================
// Templates
// ============================================================================

/// Echo of the control state, so a full page render keeps the inputs.
#[cfg(feature = "web")]
pub struct QueryEcho {
    pub q: String,
    pub flowering: bool,
    pub edible: bool,
    pub medicinal: bool,
    pub toxic: bool,
    pub min_conf: f64,
    pub sort: &'static str,
}

#[cfg(feature = "web")]
impl QueryEcho {
    fn from_snapshot(snapshot: &QuerySnapshot) -> Self {
        let has = |key| snapshot.required_attributes.contains(&key);
        QueryEcho {
            q: snapshot.search.clone(),
            flowering: has(AttributeKey::Flowering),
            edible: has(AttributeKey::Edible),
            medicinal: has(AttributeKey::Medicinal),
            toxic: has(AttributeKey::ToxicToPets),
            min_conf: snapshot.min_confidence,
            sort: snapshot.sort.map(|m| m.as_str()).unwrap_or(""),
        }
    }
}

/// A card paired with its record's position in the raw catalogue array,
/// which is what the detail route addresses.
#[cfg(feature = "web")]
pub struct IndexedCard {
    pub detail_index: usize,
    pub card: CardViewModel,
}

#[cfg(feature = "web")]
#[derive(Template)]
#[template(path = "pages/catalogue.html")]
pub struct CataloguePageTemplate {
    pub title: String,
    pub record_count: usize,
    pub grid: GridViewModel,
    pub cards: Vec<IndexedCard>,
    pub echo: QueryEcho,
}

#[cfg(feature = "web")]
#[derive(Template)]
#[template(path = "fragments/grid.html")]
pub struct GridTemplate {
    pub grid: GridViewModel,
    pub cards: Vec<IndexedCard>,
}

#[cfg(feature = "web")]
#[derive(Template)]
#[template(path = "fragments/detail.html")]
pub struct DetailTemplate {
    pub detail: DetailViewModel,
}

// ============================================================================
// Handlers
// ============================================================================

/// Position of a borrowed subset record in the raw catalogue array.
/// Every subset record borrows from `records`, so a match always exists.
#[cfg(feature = "web")]
fn raw_index(records: &[PlantRecord], record: &PlantRecord) -> usize {
    records
        .iter()
        .position(|candidate| std::ptr::eq(candidate, record))
        .unwrap_or_default()
}

/// Run one pipeline pass and pair the resulting cards with their raw
/// catalogue indices for the detail links.
#[cfg(feature = "web")]
fn project_grid(state: &AppState, snapshot: &QuerySnapshot) -> (GridViewModel, Vec<IndexedCard>) {
    let subset = filter_and_sort(&state.records, snapshot);
    let grid = build_grid(&subset, &state.api_base_url);
    let cards = grid
        .cards()
        .iter()
        .zip(subset.iter())
        .map(|(card, record)| IndexedCard {
            detail_index: raw_index(&state.records, record),
            card: card.clone(),
        })
        .collect();
    (grid, cards)
}

/// Full catalogue page: controls plus the grid for the current query.
#[cfg(feature = "web")]
pub async fn catalogue_page(
    State(state): State<AppState>,
    Query(query): Query<CatalogueQuery>,
) -> impl IntoResponse {
    let snapshot = query.snapshot();
    let (grid, cards) = project_grid(&state, &snapshot);
    let template = CataloguePageTemplate {
        title: "Plant Catalogue".to_string(),
        record_count: state.records.len(),
        grid,
        cards,
        echo: QueryEcho::from_snapshot(&snapshot),
    };
    Html(template.render().unwrap_or_else(|e| format!("Template error: {}", e)))
}

/// Grid fragment for htmx swaps; non-htmx requests get the full page.
/// Rendered fragments are cached per normalized query.
#[cfg(feature = "web")]
pub async fn catalogue_grid(
    HxRequest(is_htmx): HxRequest,
    State(state): State<AppState>,
    Query(query): Query<CatalogueQuery>,
) -> Result<axum::response::Response, AppError> {
    if !is_htmx {
        return Ok(catalogue_page(State(state), Query(query))
            .await
            .into_response());
    }

    let cache_key = query.cache_key();
    if let Some(cached) = state.grid_cache.get(&cache_key).await {
        tracing::debug!("Cache hit for grid fragment");
        return Ok(Html(cached).into_response());
    }

    let snapshot = query.snapshot();
    let (grid, cards) = project_grid(&state, &snapshot);
    let template = GridTemplate { grid, cards };
    let html = template
        .render()
        .map_err(|e| AppError::Template(e.to_string()))?;

    state.grid_cache.insert(cache_key, html.clone()).await;
    Ok(Html(html).into_response())
}

/// Detail panel fragment for one record, addressed by its position in the
/// raw catalogue array.
#[cfg(feature = "web")]
pub async fn plant_detail(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Html<String>, AppError> {
    let record = state
        .records
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", index)))?;

    let template = DetailTemplate {
        detail: build_detail(record, &state.api_base_url),
    };
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Template(e.to_string()))
}
