use anyhow::Result;
use briefly::image2text::{OcrConfig, TesseractEngine};
use briefly::summarize::{HttpSummarizer, SummarizerConfig};
use briefly_app::common::init_logger_exe;
use briefly_app::service::{router, AppState, DEFAULT_BODY_LIMIT};
use std::net::SocketAddr;
use tokio::net::TcpListener;

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn ocr_config_from_env() -> OcrConfig {
    let number = |name: &str| env_var(name).and_then(|v| v.parse().ok());
    OcrConfig::new(
        env_var("BRIEFLY_OCR_LANG"),
        number("BRIEFLY_OCR_DPI"),
        number("BRIEFLY_OCR_PSM"),
        number("BRIEFLY_OCR_OEM"),
    )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", err);
        return;
    }
    log::warn!("Ctrl-C received, stopping...");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger_exe();

    log::info!("Starting server...");

    match TesseractEngine::version() {
        Ok(version) => log::info!("Using tesseract {}", version.lines().next().unwrap_or_default()),
        Err(err) => log::warn!("{}; image summaries will fail", err),
    }

    let summarizer_config = SummarizerConfig::from_env();
    let summarizer = HttpSummarizer::new(&summarizer_config)?;
    log::info!("Summaries generated by {} at {}", summarizer_config.model(), summarizer.endpoint());

    let body_limit = env_var("BRIEFLY_BODY_LIMIT")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_BODY_LIMIT);
    let state = AppState::new(TesseractEngine::new(ocr_config_from_env()), summarizer);
    let app = router(state, body_limit);

    let port: u16 = match env_var("PORT") {
        Some(port) => port
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid PORT value: {}", port))?,
        None => 3000,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    log::info!("Attempting to bind to port {}", port);
    let listener = TcpListener::bind(addr).await?;
    log::info!("Successfully bound to http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Exiting...");
    Ok(())
}
