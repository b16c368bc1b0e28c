use axum::{response::Redirect, routing::get};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use halograph::api;
use halograph::models::AppConfig;
use halograph::server;
use halograph::services::{decode_raster, HttpImageFetcher, ImageFetcher};
use halftone::{HalftoneOptions, HalftoneProcessor};

#[derive(Parser)]
#[command(name = "halograph")]
#[command(about = "Halograph - halftone rendering service for raster images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address, e.g. 0.0.0.0:3000 (overrides config and BIND_ADDR)
        #[arg(short, long)]
        bind: Option<String>,

        /// Path to the YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render an image directly to a PNG file
    Render {
        /// Source image: file path or http(s) URL
        #[arg(short, long)]
        input: String,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Dot shape: circle, square, or triangle
        #[arg(long, default_value = "circle")]
        dot_type: String,

        /// Brightness mapping: scale, opacity, or both
        #[arg(long, default_value = "scale")]
        effect_type: String,

        /// Fill: solid, gradient2, or gradient3
        #[arg(long, default_value = "solid")]
        color_mode: String,

        /// Solid fill color (hex, rgb() or hsl())
        #[arg(long)]
        color: Option<String>,

        /// Comma-separated gradient stop colors
        #[arg(long)]
        gradient_colors: Option<String>,

        /// Gradient axis in degrees, 0 pointing right and 90 down
        #[arg(long)]
        gradient_angle: Option<f32>,

        /// Dot pitch in pixels (default: derived from image size)
        #[arg(long)]
        spacing: Option<f32>,

        /// Downscale bound for the working raster width
        #[arg(long)]
        max_width: Option<u32>,

        /// Downscale bound for the working raster height
        #[arg(long)]
        max_height: Option<u32>,

        /// Supersample for softer dot edges
        #[arg(long)]
        smoothing: bool,

        /// Crop transparent borders from the result
        #[arg(long)]
        trim: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Halograph API",
        description = "Halftone rendering service for raster images",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(api::handle_render, api::handle_proxy),
    components(schemas(api::RenderJsonResponse, api::ApiErrorResponse)),
    tags(
        (name = "Render", description = "Halftone rendering and image proxying")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            dot_type,
            effect_type,
            color_mode,
            color,
            gradient_colors,
            gradient_angle,
            spacing,
            max_width,
            max_height,
            smoothing,
            trim,
        }) => {
            run_render_command(
                &input,
                &output,
                &dot_type,
                &effect_type,
                &color_mode,
                color,
                gradient_colors,
                gradient_angle,
                spacing,
                max_width,
                max_height,
                smoothing,
                trim,
            )
            .await
        }
        Some(Commands::Serve { bind, config }) => run_server(bind, config).await,
        None => run_server(None, None).await,
    }
}

/// Render an image directly to a PNG file (no server needed)
#[allow(clippy::too_many_arguments)]
async fn run_render_command(
    input: &str,
    output: &Path,
    dot_type: &str,
    effect_type: &str,
    color_mode: &str,
    color: Option<String>,
    gradient_colors: Option<String>,
    gradient_angle: Option<f32>,
    spacing: Option<f32>,
    max_width: Option<u32>,
    max_height: Option<u32>,
    smoothing: bool,
    trim: bool,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halograph=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut options = HalftoneOptions::new()
        .with_dot_type(dot_type.parse()?)
        .with_effect_type(effect_type.parse()?)
        .with_color_mode(color_mode.parse()?)
        .with_smoothing(smoothing)
        .with_trim(trim);

    if let Some(color) = color {
        options = options.with_color(color);
    }
    if let Some(list) = gradient_colors {
        let stops: Vec<String> = list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        options = options.with_gradient_colors(stops);
    }
    if let Some(degrees) = gradient_angle {
        options = options.with_gradient_angle(degrees);
    }
    if let Some(spacing) = spacing {
        options = options.with_spacing(spacing);
    }
    options.max_width = max_width;
    options.max_height = max_height;

    let bytes = if input.starts_with("http://") || input.starts_with("https://") {
        let fetcher = HttpImageFetcher::new(Duration::from_secs(30), 20 * 1024 * 1024)?;
        fetcher.fetch(input).await?.bytes
    } else {
        std::fs::read(input)?
    };

    let source = decode_raster(&bytes)?;
    let image = HalftoneProcessor::new(options)?.process(source)?;
    let png = image.encode_png()?;
    std::fs::write(output, &png)?;

    println!(
        "Rendered {} -> {} ({}x{}, {} bytes)",
        input,
        output.display(),
        image.width(),
        image.height(),
        png.len()
    );

    Ok(())
}

/// Run the HTTP server
async fn run_server(bind: Option<String>, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halograph=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = config_path
        .or_else(|| std::env::var("HALOGRAPH_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("halograph.yaml"));
    let config = Arc::new(AppConfig::load(&config_path));

    let bind_addr = bind
        .or_else(|| std::env::var("BIND_ADDR").ok())
        .unwrap_or_else(|| config.bind_addr.clone());

    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Demo playground (production only)
        .route("/", get(|| async { Redirect::permanent("/static/index.html") }))
        .nest_service("/static", ServeDir::new("./static"));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Halograph server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
