use std::sync::Arc;

use crate::config::Config;
use bucketlist_core::state::StateStoreTrait;
use bucketlist_core::GoalStore;
use bucketlist_storage_sqlite::{db, SqliteStateStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_store: Arc<GoalStore>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("BL_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let state_store: Arc<dyn StateStoreTrait> = Arc::new(SqliteStateStore::new(pool));
    let goal_store = Arc::new(GoalStore::new(state_store));

    Ok(Arc::new(AppState {
        goal_store,
        db_path,
    }))
}
