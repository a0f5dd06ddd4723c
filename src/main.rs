use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use paint_recolor::Rgb8;
use wallpaint::api;
use wallpaint::models::{AppConfig, SceneType};
use wallpaint::server;
use wallpaint::services::{imaging, SegmentationClient, Session};

#[derive(Parser)]
#[command(name = "wallpaint")]
#[command(about = "Wallpaint - preview a paint color on a photographed wall")]
struct Cli {
    /// Path to config.yaml (defaults to $CONFIG_FILE, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Repaint a photo and write the result as PNG
    Paint {
        /// Input photo
        #[arg(short, long)]
        image: PathBuf,

        /// Surface type to detect
        #[arg(short, long, value_enum, default_value_t = SceneType::Exterior)]
        scene: SceneType,

        /// Paint color as hex (e.g. "#9CAF88")
        #[arg(short, long)]
        color: String,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Fetch the feathered mask for a photo and write it as greyscale PNG
    Mask {
        /// Input photo
        #[arg(short, long)]
        image: PathBuf,

        /// Surface type to detect
        #[arg(short, long, value_enum, default_value_t = SceneType::Exterior)]
        scene: SceneType,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wallpaint API",
        description = "Preview a paint color on a photographed wall",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_session,
        api::handle_upload,
        api::handle_mask,
        api::handle_paint,
    ),
    components(schemas(api::SessionResponse, api::MaskRequest)),
    tags(
        (name = "Session", description = "Photo upload and mask lifecycle"),
        (name = "Paint", description = "Recolored previews")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Serve) => run_server(config_path.as_deref()).await,
        Some(Commands::Paint {
            image,
            scene,
            color,
            output,
        }) => run_paint_command(config_path.as_deref(), &image, scene, &color, &output).await,
        Some(Commands::Mask {
            image,
            scene,
            output,
        }) => run_mask_command(config_path.as_deref(), &image, scene, &output).await,
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallpaint=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load a photo and fetch its mask, ready for painting
async fn masked_session(
    config: &AppConfig,
    image: &Path,
    scene: SceneType,
) -> anyhow::Result<Session> {
    let client = SegmentationClient::new(&config.segmentation, config.mask)?;
    let bytes = std::fs::read(image)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", image.display()))?;

    let mut session = Session::new();
    session.load_image(bytes, &config.canvas)?;
    session.request_mask(&client, scene).await?;
    Ok(session)
}

/// Repaint a photo directly to a PNG file (no server needed)
async fn run_paint_command(
    config_path: Option<&Path>,
    image: &Path,
    scene: SceneType,
    color: &str,
    output: &Path,
) -> anyhow::Result<()> {
    init_cli_tracing();

    // Reject a bad color before spending a segmentation round-trip
    let target: Rgb8 = color
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid color '{color}': {e}"))?;

    let config = AppConfig::load(config_path).with_env_overrides();
    let session = masked_session(&config, image, scene).await?;
    let painted = session.apply_color(&target.to_hex())?;
    let png_bytes = imaging::encode_png(&painted)?;

    std::fs::write(output, &png_bytes)?;
    println!(
        "Painted {} with {} ({}x{}, {} bytes)",
        output.display(),
        target,
        painted.width(),
        painted.height(),
        png_bytes.len()
    );

    Ok(())
}

/// Write the feathered mask for a photo as a greyscale PNG
async fn run_mask_command(
    config_path: Option<&Path>,
    image: &Path,
    scene: SceneType,
    output: &Path,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::load(config_path).with_env_overrides();
    let session = masked_session(&config, image, scene).await?;
    let mask = session
        .mask()
        .ok_or_else(|| anyhow::anyhow!("Session has no mask"))?;
    let png_bytes = imaging::encode_mask_png(mask)?;

    std::fs::write(output, &png_bytes)?;
    println!(
        "Wrote mask {} ({}x{}, {:.1}% painted)",
        output.display(),
        mask.width(),
        mask.height(),
        mask.coverage() * 100.0
    );

    Ok(())
}

/// Print the resolved configuration
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config = AppConfig::load(config_path).with_env_overrides();

    println!("Wallpaint v{VERSION}");
    println!("Paint color preview for photographed walls\n");

    println!("Configuration:");
    println!(
        "  config file    = {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in defaults)".to_string())
    );
    println!("  segmentation   = {}", config.segmentation.endpoint);
    println!("  timeout        = {}s", config.segmentation.timeout_secs);
    println!(
        "  canvas         = {}x{} max",
        config.canvas.max_width, config.canvas.max_height
    );
    println!("  feather sigma  = {}", config.mask.feather_sigma);
    println!("  mask channel   = {:?}", config.mask.channel);
    println!("  bind address   = {}", config.bind_addr);

    println!("\nCommands:");
    println!("  wallpaint serve                                   Start the HTTP server");
    println!("  wallpaint paint -i photo.jpg -c '#9CAF88' -o out.png   Repaint a photo");
    println!("  wallpaint mask -i photo.jpg -o mask.png               Inspect the mask");
}

/// Run the HTTP server
async fn run_server(config_path: Option<&Path>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallpaint=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(config_path).with_env_overrides();
    let bind_addr = config.bind_addr.clone();

    // Create application state using shared server module
    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Wallpaint server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
