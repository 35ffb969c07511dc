use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use therascribe::{
    create_router, AppState, Config, DocsClient, FirestoreSessions, GeminiClient, IdentityClient,
    SpeechClient, StorageClient, TranscriptPipeline,
};
use tracing::info;

/// Therapy-session transcript and clinical note service
#[derive(Parser, Debug)]
#[command(name = "therascribe")]
#[command(about = "Turns recorded speech-therapy sessions into shareable clinical documents")]
struct Args {
    /// Configuration file path (without extension)
    #[arg(short, long, default_value = "config/therascribe")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!(
        "HTTP server will bind to {}:{}",
        cfg.service.http.bind, cfg.service.http.port
    );

    // One HTTP client shared by every collaborator. The per-request timeout
    // stays well under the whole-pipeline bound.
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .context("failed to build HTTP client")?;

    let pipeline = Arc::new(TranscriptPipeline::new(
        Arc::new(StorageClient::new(http_client.clone(), &cfg.storage)),
        Arc::new(SpeechClient::new(http_client.clone(), &cfg.speech)),
        Arc::new(GeminiClient::new(http_client.clone(), &cfg.generation)),
        Arc::new(DocsClient::new(http_client.clone(), &cfg.docs)),
        Arc::new(FirestoreSessions::new(http_client.clone(), &cfg.sessions)),
        cfg.service.scratch_dir.clone().into(),
        cfg.service.ffmpeg_path.clone(),
    ));
    let verifier = Arc::new(IdentityClient::new(http_client, &cfg.identity));

    let state = AppState::new(
        pipeline,
        verifier,
        Duration::from_secs(cfg.service.pipeline_timeout_secs),
    );
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
