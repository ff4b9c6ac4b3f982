//! Request handlers for the HTTP adapter

use crate::config::{check_worker_limit, Config};
use crate::crawler::create_site_map_with_config;
use crate::sitemap::SiteMap;
use crate::SiteMapError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// Failures a `/sitemap` request can end in
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing query parameter \"{0}\"")]
    MissingParameter(&'static str),

    #[error("invalid workers value '{value}': {source}")]
    InvalidWorkers {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error(transparent)]
    Crawl(#[from] SiteMapError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::PRECONDITION_FAILED,
            ApiError::InvalidWorkers { .. } | ApiError::Crawl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// `GET /sitemap?site=<URL>&workers=<N>`
///
/// Runs one crawl to completion and answers with its JSON site map. The
/// worker count is capped at [`crate::config::MAX_WORKERS`], like a
/// configured one.
pub async fn get_site_map(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SiteMap>, ApiError> {
    let site = params
        .get("site")
        .ok_or(ApiError::MissingParameter("site"))?;
    let workers = params
        .get("workers")
        .ok_or(ApiError::MissingParameter("workers"))?;

    let workers: usize = workers
        .trim()
        .parse()
        .map_err(|source| ApiError::InvalidWorkers {
            value: workers.clone(),
            source,
        })?;
    check_worker_limit(workers).map_err(SiteMapError::from)?;

    let mut config = (*state.config).clone();
    config.crawler.workers = workers;

    match create_site_map_with_config(site, &config).await {
        Ok(site_map) => Ok(Json(site_map)),
        Err(e) => {
            tracing::warn!("Site map request for {} failed: {}", site, e);
            Err(e.into())
        }
    }
}
