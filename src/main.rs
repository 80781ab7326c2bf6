use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod error;
mod state;
mod ui;

use api::ApiClient;
use app::PixelGallery;
use config::GalleryConfig;
use ui::dialogs::NativeDialogs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixel_gallery=info")),
        )
        .init();

    let config = GalleryConfig::load()?;
    info!(
        "🎨 Pixel Gallery starting against {} ({} mode)",
        config.api_base,
        if config.is_owner { "owner" } else { "viewer" }
    );

    let api = ApiClient::new(config)?;

    iced::application(PixelGallery::title, PixelGallery::update, PixelGallery::view)
        .theme(PixelGallery::theme)
        .window_size((1100.0, 820.0))
        .centered()
        .run_with(move || PixelGallery::new(api, Box::new(NativeDialogs)))?;

    Ok(())
}
