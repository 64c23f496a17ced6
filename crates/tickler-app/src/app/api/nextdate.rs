use salvo::http::StatusCode;
use salvo::writing::Text;
use salvo::{Request, Response, Router, handler};
use tickler_core::constants::NEXT_DATE_ROUTE_COMPONENT;
use tickler_rule::RuleResult;
use tickler_rule::calendar::parse_date;

fn param(req: &Request, name: &str) -> String {
    req.query::<String>(name).unwrap_or_default()
}

fn evaluate(now: &str, date: &str, repeat: &str) -> RuleResult<String> {
    let reference = parse_date(now)?;
    tickler_rule::next_date(reference, date, repeat)
}

/// ## Summary
/// GET /api/nextdate - Next occurrence of `repeat` after `now`, counted from `date`
///
/// ## Errors
/// Returns HTTP 400 with the reason as plain text for a missing or malformed `now`, a
/// malformed date or rule, or a rule that never fires.
#[handler]
#[tracing::instrument(skip_all)]
async fn next_date(req: &mut Request, res: &mut Response) {
    let (now, date, repeat) = (param(req, "now"), param(req, "date"), param(req, "repeat"));

    match evaluate(&now, &date, &repeat) {
        Ok(next) => {
            tracing::debug!(%now, %date, %repeat, %next, "Computed next date");
            res.render(Text::Plain(next));
        }
        Err(e) => {
            tracing::debug!(error = %e, %now, %date, %repeat, "Rejected next date request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(NEXT_DATE_ROUTE_COMPONENT).get(next_date)
}
