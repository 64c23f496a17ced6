use std::sync::Arc;

use salvo::async_trait;
use tickler_core::error::CoreError;
use tickler_db::db::DbProvider;

use crate::error::AppResult;

/// Connection source shared by every request.
pub type SharedDb = Arc<dyn DbProvider + Send + Sync>;

/// Puts the connection source into each request's depot.
pub struct DbProviderHandler {
    provider: SharedDb,
}

impl DbProviderHandler {
    #[must_use]
    pub fn new<T: DbProvider + 'static>(provider: T) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }
}

#[async_trait]
impl salvo::Handler for DbProviderHandler {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.provider));
    }
}

/// ## Summary
/// Retrieves the database provider from the depot.
///
/// ## Errors
/// Returns an error if the database provider is not found in the depot.
pub fn get_db_from_depot(depot: &salvo::Depot) -> AppResult<SharedDb> {
    depot.obtain::<SharedDb>().cloned().map_err(|_err| {
        CoreError::InvariantViolation("Database provider not found in depot").into()
    })
}
