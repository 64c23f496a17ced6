pub mod api;
pub mod web;

use salvo::Router;
use salvo::logging::Logger;
use tickler_core::config::Settings;
use tickler_db::db::DbProvider;

use crate::config::ConfigHandler;
use crate::db_handler::DbProviderHandler;

/// ## Summary
/// Builds the complete router: request logging, depot injection, the API and the
/// static web client.
///
/// ## Errors
/// Returns an error if the API routes fail to build.
pub fn router<T: DbProvider + 'static>(settings: Settings, provider: T) -> anyhow::Result<Router> {
    let web_dir = settings.web.dir.clone();

    Ok(Router::new()
        .hoop(Logger::new())
        .hoop(DbProviderHandler::new(provider))
        .hoop(ConfigHandler::new(settings))
        .push(api::routes()?)
        .push(web::routes(&web_dir)))
}
