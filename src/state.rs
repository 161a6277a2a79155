use crate::applications::repo::{ApplicationStore, PgApplicationStore};
use crate::config::AppConfig;
use crate::db;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ApplicationStore>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(config).await?;
        db::ensure_schema(&pool).await?;

        let store = Arc::new(PgApplicationStore::new(pool)) as Arc<dyn ApplicationStore>;
        Ok(Self::from_parts(store))
    }

    pub fn from_parts(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::applications::memory::MemoryStore;

        Self::from_parts(Arc::new(MemoryStore::default()))
    }
}
