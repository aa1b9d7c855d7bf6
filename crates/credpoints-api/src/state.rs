//! Application state wiring the assistant together.
//!
//! The core types are generic over their catalog and fetcher ports; AppState
//! pins them to the SQLite tier rules and the HTTP badge fetcher.

use std::path::PathBuf;
use std::sync::Arc;

use credpoints_core::catalog::CatalogService;
use credpoints_core::compose::ResponseComposer;
use credpoints_core::engine::{DecisionEngine, NameExtractor};
use credpoints_core::session::SessionOrchestrator;
use credpoints_infra::config::load_global_config;
use credpoints_infra::credly::CredlyBadgeFetcher;
use credpoints_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use credpoints_infra::llm::phrasing_backend_from_config;
use credpoints_infra::sqlite::pool::{DatabasePool, database_url};
use credpoints_infra::sqlite::tier::SqliteTierRuleRepository;
use credpoints_types::config::GlobalConfig;

pub type ConcreteCatalog = CatalogService<SqliteTierRuleRepository>;

pub type ConcreteOrchestrator = SessionOrchestrator<ConcreteCatalog, CredlyBadgeFetcher>;

/// Shared application state used by every command.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub config: GlobalConfig,
    /// "provider / model" when replies are phrased by an LLM.
    pub llm_label: Option<String>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_in(resolve_data_dir()).await
    }

    /// Open the catalog under `data_dir` and wire the assistant.
    pub async fn init_in(data_dir: PathBuf) -> anyhow::Result<Self> {
        ensure_data_dir(&data_dir).await?;
        let config = load_global_config(&data_dir).await;

        let db_pool = DatabasePool::new(&database_url(&data_dir, &config.catalog.database)).await?;
        let catalog = CatalogService::new(SqliteTierRuleRepository::new(db_pool));
        let fetcher = CredlyBadgeFetcher::new(&config.fetcher)?;

        let backend = phrasing_backend_from_config(&config.llm).map(Arc::new);
        let llm_label = backend
            .as_ref()
            .map(|b| format!("{} / {}", b.provider_name(), b.model()));
        let (extractor, composer) = match backend {
            Some(backend) => (
                NameExtractor::with_backend(Arc::clone(&backend)),
                ResponseComposer::with_backend(backend),
            ),
            None => (NameExtractor::keyword_only(), ResponseComposer::templated()),
        };

        let engine = DecisionEngine::new(catalog, fetcher, extractor);
        let orchestrator = Arc::new(SessionOrchestrator::new(engine, composer));

        tracing::debug!(
            data_dir = %data_dir.display(),
            llm = llm_label.as_deref().unwrap_or("templates"),
            "application state ready"
        );

        Ok(Self {
            orchestrator,
            config,
            llm_label,
        })
    }
}
