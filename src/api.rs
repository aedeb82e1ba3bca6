//! Read-only HTTP endpoints.
//!
//! The game itself is driven over the WebSocket; these exist for setup
//! screens and debugging.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::options::OptionsState;
use crate::protocol::SessionView;
use crate::state::AppState;
use crate::types::CATEGORIES;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OptionsStatus {
    Loading,
    Loaded,
    Failed,
}

/// One entry of the category picker
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInfo {
    pub value: String,
    pub label: String,
    /// Number of items fetched for this category (0 while loading)
    pub option_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub status: OptionsStatus,
    pub error: Option<String>,
    pub categories: Vec<CategoryInfo>,
}

/// List the known categories and the state of the options fetch.
///
/// GET /api/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<CategoriesResponse> {
    let options = state.options_state().await;
    Json(categories_response(&options))
}

fn categories_response(options: &OptionsState) -> CategoriesResponse {
    let snapshot = options.snapshot();

    let status = match snapshot {
        None => OptionsStatus::Loading,
        Some(s) if s.fetch_error.is_some() => OptionsStatus::Failed,
        Some(_) => OptionsStatus::Loaded,
    };

    let categories = CATEGORIES
        .iter()
        .map(|(value, label)| CategoryInfo {
            value: value.to_string(),
            label: label.to_string(),
            option_count: snapshot.map_or(0, |s| s.options.category(value).len()),
        })
        .collect();

    CategoriesResponse {
        status,
        error: snapshot.and_then(|s| s.fetch_error.clone()),
        categories,
    }
}

/// Current redacted session view.
///
/// GET /api/session
pub async fn session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(state.session_view().await)
}
