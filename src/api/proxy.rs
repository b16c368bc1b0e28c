use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;

/// Query parameters for the proxy endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ProxyQuery {
    #[serde(default)]
    pub url: Option<String>,
}

/// Proxy a remote image for browser callers
///
/// Fetches `url` server-side and forwards the bytes, so pages served from
/// this host can load cross-origin images without CORS trouble.
#[utoipa::path(
    get,
    path = "/api/halograph/proxy",
    responses(
        (status = 200, description = "Upstream image bytes"),
        (status = 400, description = "Missing url parameter"),
        (status = 403, description = "URL not allowed"),
        (status = 502, description = "Upstream fetch failed"),
    ),
    params(
        ("url" = String, Query, description = "Image URL to fetch"),
    ),
    tag = "Render"
)]
pub async fn handle_proxy(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, ApiError> {
    let url = query.url.as_deref().ok_or(ApiError::MissingParam("url"))?;

    if !state.config.is_url_allowed(url) {
        tracing::warn!(url = %url, "Rejected proxy request for disallowed URL");
        return Err(ApiError::UrlNotAllowed(url.to_string()));
    }

    let fetched = state.fetcher.fetch(url).await?;
    let content_type = fetched
        .content_type
        .unwrap_or_else(|| "image/png".to_string());

    tracing::debug!(
        url = %url,
        content_type = %content_type,
        size_bytes = fetched.bytes.len(),
        "Proxying image"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.as_str()),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        Bytes::from(fetched.bytes),
    )
        .into_response())
}
