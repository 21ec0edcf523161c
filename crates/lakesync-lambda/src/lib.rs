// AWS Lambda runtime adapter
//
// Invoked once per deployment by an external trigger after the dataset for
// a period has been fully uploaded. The event payload carries nothing the
// sync needs; all inputs come from configuration resolved at startup.

use lakesync_catalog::PartitionRegistrar;
use lakesync_config::{LogFormat, Platform, RuntimeConfig};
use lakesync_glue::GlueCatalogClient;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

struct LambdaState {
    config: RuntimeConfig,
    registrar: PartitionRegistrar,
}

/// Lambda handler: one fan-out pass per invocation, event ignored
async fn handle_request(
    _event: LambdaEvent<Value>,
    state: Arc<LambdaState>,
) -> Result<Value, Error> {
    state
        .registrar
        .register_across_tables(
            &state.config.catalog.database,
            &state.config.sync.tables,
            &state.config.sync.partition_values,
        )
        .await?;

    Ok(json!({
        "status": "ok",
        "database": state.config.catalog.database,
        "tables_registered": state.config.sync.tables.len(),
    }))
}

/// Lambda runtime entry point
pub async fn run() -> Result<(), Error> {
    let config = RuntimeConfig::load()?;
    init_tracing(&config);

    let client = GlueCatalogClient::connect(
        config.catalog.region.as_deref(),
        Duration::from_secs(config.catalog.timeout_secs),
    )
    .await;

    let state = Arc::new(LambdaState {
        registrar: PartitionRegistrar::new(Arc::new(client)),
        config,
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = state.clone();
        async move { handle_request(event, state).await }
    }))
    .await
}

fn init_tracing(config: &RuntimeConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_new(config.log.resolved_level())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let _ = match config.log.resolved_format(Platform::Lambda) {
        LogFormat::Json => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().json()))
        }
        LogFormat::Text => tracing::subscriber::set_global_default(registry.with(fmt::layer())),
    };
}
