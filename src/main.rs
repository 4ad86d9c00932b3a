use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

use chatfront::compose::AnswerService;
use chatfront::upstream::ChatApiClient;
use chatfront::{run_server, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();

    let upstream = ChatApiClient::new(
        config.upstream.base_url.clone(),
        Duration::from_secs(config.upstream.request_timeout_secs),
    )?;

    let upstream_limit = Arc::new(Semaphore::new(config.upstream.max_concurrent_requests));
    let service = AnswerService::new(config.clone(), upstream, upstream_limit);

    run_server(config, service).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
