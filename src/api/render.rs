use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use halftone::HalftoneOptions;

use crate::error::ApiError;
use crate::models::RenderDefaults;
use crate::server::AppState;
use crate::services::decode_raster;

/// Error response for render endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Status code
    pub status: u16,
    /// Error message
    pub error: String,
}

/// Query parameters for the render endpoint
#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub dot_type: Option<String>,
    #[serde(default)]
    pub effect_type: Option<String>,
    #[serde(default)]
    pub color_mode: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Comma-separated list of gradient stop colors
    #[serde(default)]
    pub gradient_colors: Option<String>,
    #[serde(default)]
    pub gradient_angle: Option<f32>,
    #[serde(default)]
    pub spacing: Option<f32>,
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub max_height: Option<u32>,
    #[serde(default)]
    pub smoothing: Option<bool>,
    #[serde(default)]
    pub trim: Option<bool>,
    /// Response format: `png` (default) or `json`
    #[serde(default)]
    pub format: Option<String>,
}

/// JSON variant of the render response (`format=json`)
#[derive(Debug, Serialize, ToSchema)]
pub struct RenderJsonResponse {
    /// Output raster width in pixels
    pub width: u32,
    /// Output raster height in pixels
    pub height: u32,
    /// Rendered PNG as a base64 data URL
    pub data_url: String,
}

fn parse_param<T>(name: &'static str, value: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ApiError::InvalidParam {
        name,
        reason: e.to_string(),
    })
}

fn split_color_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Merge request parameters over configured defaults into render options.
///
/// Request values win; absent request values inherit the config; absent both
/// fall back to the built-in defaults.
pub fn build_options(
    query: &RenderQuery,
    defaults: &RenderDefaults,
) -> Result<HalftoneOptions, ApiError> {
    let base = HalftoneOptions::new();

    let dot_type = match query.dot_type.as_deref().or(defaults.dot_type.as_deref()) {
        Some(value) => parse_param("dot_type", value)?,
        None => base.dot_type,
    };
    let effect_type = match query
        .effect_type
        .as_deref()
        .or(defaults.effect_type.as_deref())
    {
        Some(value) => parse_param("effect_type", value)?,
        None => base.effect_type,
    };
    let color_mode = match query
        .color_mode
        .as_deref()
        .or(defaults.color_mode.as_deref())
    {
        Some(value) => parse_param("color_mode", value)?,
        None => base.color_mode,
    };

    let gradient_colors = match query.gradient_colors.as_deref() {
        Some(list) => split_color_list(list),
        None => defaults.gradient_colors.clone().unwrap_or_default(),
    };

    let spacing = query.spacing.or(defaults.spacing);
    if let Some(value) = spacing {
        if !value.is_finite() || value <= 0.0 {
            return Err(ApiError::InvalidParam {
                name: "spacing",
                reason: format!("must be a positive number, got {value}"),
            });
        }
    }

    Ok(HalftoneOptions {
        dot_type,
        effect_type,
        color_mode,
        color: query.color.clone().or_else(|| defaults.color.clone()),
        gradient_colors,
        gradient_angle: query
            .gradient_angle
            .or(defaults.gradient_angle)
            .unwrap_or(base.gradient_angle),
        spacing,
        max_width: query.max_width.or(defaults.max_width),
        max_height: query.max_height.or(defaults.max_height),
        smoothing: query.smoothing.or(defaults.smoothing).unwrap_or(base.smoothing),
        trim: query.trim.or(defaults.trim).unwrap_or(base.trim),
    })
}

/// Render a remote image as a halftone
///
/// Fetches `src`, decodes it, and renders the halftone with the request
/// parameters merged over the configured defaults. Responds with PNG bytes
/// by default, or `{width, height, data_url}` for `format=json`.
#[utoipa::path(
    get,
    path = "/api/halograph/render",
    responses(
        (status = 200, description = "Rendered halftone; PNG bytes, or RenderJsonResponse for format=json", content_type = "image/png"),
        (status = 400, description = "Missing or invalid parameter", body = ApiErrorResponse),
        (status = 403, description = "Source URL not allowed"),
        (status = 502, description = "Source fetch or decode failed"),
    ),
    params(
        ("src" = String, Query, description = "Source image URL"),
        ("dot_type" = Option<String>, Query, description = "Dot shape: circle, square, or triangle"),
        ("effect_type" = Option<String>, Query, description = "Brightness mapping: scale, opacity, or both"),
        ("color_mode" = Option<String>, Query, description = "Fill: solid, gradient2, or gradient3"),
        ("color" = Option<String>, Query, description = "Solid fill color (hex, rgb() or hsl())"),
        ("gradient_colors" = Option<String>, Query, description = "Comma-separated gradient stop colors"),
        ("gradient_angle" = Option<f32>, Query, description = "Gradient axis in degrees, 0 right, 90 down"),
        ("spacing" = Option<f32>, Query, description = "Dot pitch in pixels (default: derived from size)"),
        ("max_width" = Option<u32>, Query, description = "Downscale bound for the working width"),
        ("max_height" = Option<u32>, Query, description = "Downscale bound for the working height"),
        ("smoothing" = Option<bool>, Query, description = "Supersample for softer dot edges"),
        ("trim" = Option<bool>, Query, description = "Crop transparent borders from the result"),
        ("format" = Option<String>, Query, description = "Response format: png (default) or json"),
    ),
    tag = "Render"
)]
pub async fn handle_render(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let src = query.src.as_deref().ok_or(ApiError::MissingParam("src"))?;

    if !state.config.is_url_allowed(src) {
        tracing::warn!(url = %src, "Rejected render request for disallowed source URL");
        return Err(ApiError::UrlNotAllowed(src.to_string()));
    }

    let options = build_options(&query, &state.config.render)?;

    let fetched = state.fetcher.fetch(src).await?;
    let source = decode_raster(&fetched.bytes)?;

    tracing::info!(
        url = %src,
        source_width = source.width(),
        source_height = source.height(),
        "Render request received"
    );

    let image = state.renderer.render(source, options).await?;
    let metadata = image.metadata();
    let png = image.encode_png()?;

    tracing::info!(
        width = image.width(),
        height = image.height(),
        size_bytes = png.len(),
        "Halftone rendered"
    );

    match query.format.as_deref() {
        Some("json") => Ok(Json(RenderJsonResponse {
            width: image.width(),
            height: image.height(),
            data_url: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
        })
        .into_response()),
        None | Some("png") => {
            let source_width = metadata.source_width.to_string();
            let source_height = metadata.source_height.to_string();
            let scale_factor = format!("{:.4}", metadata.scale_factor());

            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "image/png"),
                    (
                        HeaderName::from_static("x-halftone-source-width"),
                        &source_width,
                    ),
                    (
                        HeaderName::from_static("x-halftone-source-height"),
                        &source_height,
                    ),
                    (
                        HeaderName::from_static("x-halftone-scale-factor"),
                        &scale_factor,
                    ),
                ],
                Bytes::from(png),
            )
                .into_response())
        }
        Some(other) => Err(ApiError::InvalidParam {
            name: "format",
            reason: format!("expected png or json, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone::{ColorMode, DotShape, EffectMode};

    #[test]
    fn test_build_options_all_defaults() {
        let options = build_options(&RenderQuery::default(), &RenderDefaults::default()).unwrap();
        assert_eq!(options, HalftoneOptions::new());
    }

    #[test]
    fn test_build_options_query_wins_over_config() {
        let query = RenderQuery {
            dot_type: Some("square".to_string()),
            spacing: Some(12.0),
            ..RenderQuery::default()
        };
        let defaults = RenderDefaults {
            dot_type: Some("triangle".to_string()),
            spacing: Some(30.0),
            ..RenderDefaults::default()
        };

        let options = build_options(&query, &defaults).unwrap();
        assert_eq!(options.dot_type, DotShape::Square);
        assert_eq!(options.spacing, Some(12.0));
    }

    #[test]
    fn test_build_options_inherits_config_defaults() {
        let defaults = RenderDefaults {
            effect_type: Some("both".to_string()),
            color_mode: Some("gradient2".to_string()),
            gradient_colors: Some(vec!["#ff0000".to_string(), "#0000ff".to_string()]),
            smoothing: Some(true),
            max_width: Some(800),
            ..RenderDefaults::default()
        };

        let options = build_options(&RenderQuery::default(), &defaults).unwrap();
        assert_eq!(options.effect_type, EffectMode::Both);
        assert_eq!(options.color_mode, ColorMode::Gradient2);
        assert_eq!(options.gradient_colors.len(), 2);
        assert!(options.smoothing);
        assert_eq!(options.max_width, Some(800));
        assert_eq!(options.max_height, None);
    }

    #[test]
    fn test_build_options_rejects_unknown_dot_type() {
        let query = RenderQuery {
            dot_type: Some("blob".to_string()),
            ..RenderQuery::default()
        };

        let err = build_options(&query, &RenderDefaults::default()).unwrap_err();
        match err {
            ApiError::InvalidParam { name, reason } => {
                assert_eq!(name, "dot_type");
                assert!(reason.contains("blob"));
            }
            other => panic!("expected InvalidParam, got {other:?}"),
        }
    }

    #[test]
    fn test_build_options_rejects_nonpositive_spacing() {
        for value in [0.0, -3.0, f32::NAN] {
            let query = RenderQuery {
                spacing: Some(value),
                ..RenderQuery::default()
            };
            let err = build_options(&query, &RenderDefaults::default()).unwrap_err();
            assert!(matches!(err, ApiError::InvalidParam { name: "spacing", .. }));
        }
    }

    #[test]
    fn test_split_color_list_trims_and_drops_empties() {
        let query = RenderQuery {
            gradient_colors: Some(" #ff0000 , , #00ff00,".to_string()),
            ..RenderQuery::default()
        };

        let options = build_options(&query, &RenderDefaults::default()).unwrap();
        assert_eq!(options.gradient_colors, vec!["#ff0000", "#00ff00"]);
    }

    #[test]
    fn test_query_gradient_colors_override_config_list() {
        let query = RenderQuery {
            gradient_colors: Some("#111111,#222222".to_string()),
            ..RenderQuery::default()
        };
        let defaults = RenderDefaults {
            gradient_colors: Some(vec!["#aaaaaa".to_string()]),
            ..RenderDefaults::default()
        };

        let options = build_options(&query, &defaults).unwrap();
        assert_eq!(options.gradient_colors, vec!["#111111", "#222222"]);
    }
}
