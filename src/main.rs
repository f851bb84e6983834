#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Storefront Admin
//!
//! Desktop admin panel for the Century Scents storefront: manage the
//! product catalog and site-wide display settings. State lives in a
//! local JSON store next to the executable; every save is broadcast so
//! the built-in storefront preview updates like the real site would.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_admin::app::AdminApp;
use storefront_admin::store::local::LocalStore;

fn main() -> Result<()> {
    // Initialize file logging
    let file_appender = tracing_appender::rolling::never(".", "storefront-admin.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Storefront Admin");

    // Log panics before the default handler runs
    let next = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("Application panic: {}", info);
        next(info);
    }));

    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    // Try wgpu first, fall back to glow for older graphics stacks
    tracing::info!("Attempting to start with wgpu renderer");
    if let Err(wgpu_err) = run_with_renderer(runtime.handle().clone(), eframe::Renderer::Wgpu) {
        tracing::warn!("wgpu renderer failed: {}. Trying glow fallback...", wgpu_err);

        if let Err(glow_err) = run_with_renderer(runtime.handle().clone(), eframe::Renderer::Glow) {
            tracing::error!("Both renderers failed. wgpu: {}, glow: {}", wgpu_err, glow_err);
            return Err(anyhow::anyhow!(
                "Could not initialize a graphics renderer (wgpu: {}; glow: {})",
                wgpu_err,
                glow_err
            ));
        }
    }

    Ok(())
}

/// Run the application with the specified renderer
fn run_with_renderer(
    runtime_handle: tokio::runtime::Handle,
    renderer: eframe::Renderer,
) -> Result<()> {
    let renderer_name = match renderer {
        eframe::Renderer::Wgpu => "wgpu",
        eframe::Renderer::Glow => "glow",
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Storefront Admin"),
        renderer,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    let store = LocalStore::open(LocalStore::default_dir())
        .map_err(|e| anyhow::anyhow!("Could not open the data directory: {}", e))?;

    eframe::run_native(
        "Storefront Admin",
        native_options,
        Box::new(move |cc| {
            setup_egui_style(cc);
            tracing::info!("Successfully initialized {} renderer", renderer_name);
            Ok(Box::new(AdminApp::new(cc, runtime_handle.clone(), store)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Setup egui visual style
fn setup_egui_style(cc: &eframe::CreationContext<'_>) {
    // Image loaders for the hero banner and product thumbnails
    egui_extras::install_image_loaders(&cc.egui_ctx);

    let mut style = (*cc.egui_ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);

    use egui::CornerRadius;
    style.visuals.widgets.noninteractive.corner_radius = CornerRadius::same(4);
    style.visuals.widgets.inactive.corner_radius = CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = CornerRadius::same(6);
    style.visuals.window_corner_radius = CornerRadius::same(10);

    cc.egui_ctx.set_style(style);
}
