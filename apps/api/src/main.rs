mod agents;
mod auth;
mod config;
mod db;
mod errors;
mod history;
mod jobs;
mod llm_client;
mod models;
mod profile;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agents::hiring::PgHiredAgentStore;
use crate::agents::lifecycle::GenerationSlots;
use crate::auth::sessions::RedisRevocationList;
use crate::auth::tokens::TokenIssuer;
use crate::config::Config;
use crate::db::create_pool;
use crate::history::store::PgHistoryStore;
use crate::jobs::boards::{JobBoard, LinkedInBoard, SampleBoard};
use crate::jobs::matching::KeywordMatchScorer;
use crate::jobs::saved::PgSavedJobStore;
use crate::llm_client::build_generator;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::uploads::PgUploadStore;
use crate::storage::S3ObjectStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Marketplace API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis (token revocation)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let revocations = Arc::new(RedisRevocationList::connect(redis).await?);
    info!("Redis connection manager initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let objects = Arc::new(S3ObjectStore::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_public_url.clone(),
    ));
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize LLM client
    let llm = build_generator(
        config.llm_provider,
        config.llm_model.clone(),
        config.llm_api_key.clone(),
    )?;
    if config.llm_api_key.is_none() {
        warn!("LLM_API_KEY is not set; generation requests will fail until it is configured");
    }
    info!("LLM client initialized (model: {})", llm.model());

    // Job boards, in display order
    let job_boards: Arc<[Arc<dyn JobBoard>]> = Arc::new([
        Arc::new(LinkedInBoard::new(config.linkedin_api_key.clone())?) as Arc<dyn JobBoard>,
        Arc::new(SampleBoard::zip_recruiter()),
        Arc::new(SampleBoard::glassdoor()),
    ]);

    let state = AppState {
        history: Arc::new(PgHistoryStore::new(db.clone())),
        hired_agents: Arc::new(PgHiredAgentStore::new(db.clone())),
        saved_jobs: Arc::new(PgSavedJobStore::new(db.clone())),
        uploads: Arc::new(PgUploadStore::new(db.clone())),
        db,
        objects,
        llm,
        slots: Arc::new(GenerationSlots::new()),
        tokens: TokenIssuer::new(&config.jwt_secret, config.session_ttl_minutes),
        revocations,
        job_boards,
        match_scorer: Arc::new(KeywordMatchScorer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web client once it has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "marketplace-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
