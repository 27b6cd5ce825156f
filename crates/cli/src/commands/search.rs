//! Search commands.

use std::sync::Arc;

use sts_core::format_amount;
use sts_storefront::search::{SearchOutcome, SearchSession};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{CommandError, Context, emit};

/// Rank the catalog for one query.
pub async fn once(ctx: &Context, query: &str) {
    let outcome = ctx.state().ranker().search(query).await;
    emit(&render_outcome(&outcome));
}

/// Feed stdin lines through a debounced search session.
///
/// Each line counts as the current contents of the search box. Only results
/// for input that stayed unchanged for the debounce period are printed.
pub async fn interactive(ctx: &Context) -> Result<(), CommandError> {
    let mut session = SearchSession::new(Arc::clone(ctx.state().ranker()));
    let mut results = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        // After end of input, stop once the final query has been ranked.
        if !input_open && results.borrow().request_id == session.latest_request() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(line) => {
                    session.input(line);
                }
                None => input_open = false,
            },
            changed = results.changed() => {
                if changed.is_err() {
                    break;
                }
                let published = results.borrow_and_update().clone();
                emit(&render_outcome(&published.outcome));
            }
        }
    }
    Ok(())
}

pub fn render_outcome(outcome: &SearchOutcome) -> String {
    if let Some(error) = &outcome.error {
        return format!("search failed: {error}");
    }
    if outcome.hits.is_empty() {
        return format!("{:?}: no results", outcome.query);
    }
    let mut lines = vec![format!("{:?}: {} result(s)", outcome.query, outcome.hits.len())];
    lines.extend(outcome.hits.iter().map(|hit| {
        format!(
            "{:>3}  {:<32} {}  (distance {})",
            hit.product.id,
            hit.product.name,
            format_amount(hit.product.price.amount()),
            hit.distance
        )
    }));
    lines.join("\n")
}
