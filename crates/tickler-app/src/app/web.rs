use salvo::Router;
use salvo::serve_static::StaticDir;

/// ## Summary
/// Serves the bundled web client from `dir`, with `index.html` as the directory
/// default.
#[must_use]
pub fn routes(dir: &str) -> Router {
    tracing::debug!(dir, "Serving web client");
    Router::with_path("{**path}").get(StaticDir::new([dir.to_string()]).defaults("index.html"))
}
