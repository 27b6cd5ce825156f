//! Cart commands.

use sts_core::{ProductId, format_amount};
use sts_storefront::cart::{CartAction, CartState, ColorChoice, resolve_add};
use sts_storefront::i18n::Translator;

use super::{CommandError, Context, emit};

pub async fn show(ctx: &Context) {
    let t = ctx.translator().await;
    let cart = ctx.state().cart().lock().await;
    emit(&render_cart(cart.state(), t));
}

/// Validate and add a product.
///
/// Without `--color` or `--no-color` the product's first color is used.
pub async fn add(
    ctx: &Context,
    product_id: &str,
    quantity: i64,
    color: Option<String>,
    no_color: bool,
) -> Result<(), CommandError> {
    let choice = match (color, no_color) {
        (Some(color), _) => ColorChoice::Explicit(color),
        (None, true) => ColorChoice::Unselected,
        (None, false) => ColorChoice::ProductDefault,
    };
    let action = resolve_add(
        ctx.state().catalog(),
        &ProductId::new(product_id),
        quantity,
        choice,
    )
    .await?;

    dispatch(ctx, action).await;
    Ok(())
}

pub async fn update(ctx: &Context, line_id: String, quantity: i64) {
    dispatch(ctx, CartAction::UpdateQuantity { line_id, quantity }).await;
}

pub async fn remove(ctx: &Context, line_id: String) {
    dispatch(ctx, CartAction::RemoveItem { line_id }).await;
}

pub async fn clear(ctx: &Context) {
    dispatch(ctx, CartAction::ClearCart).await;
}

async fn dispatch(ctx: &Context, action: CartAction) {
    let t = ctx.translator().await;
    let mut cart = ctx.state().cart().lock().await;
    emit(&render_cart(cart.dispatch(action), t));
}

/// Line items with their IDs, then the item count and total.
pub fn render_cart(state: &CartState, t: Translator) -> String {
    if state.is_empty() {
        return t.t("cart.empty").to_string();
    }

    let mut lines: Vec<String> = state
        .items()
        .iter()
        .map(|item| {
            let color = item
                .selected_color
                .as_deref()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default();
            format!(
                "{:<24} {}{color} x{}  {}",
                item.id,
                item.product.name,
                item.quantity,
                format_amount(item.line_total())
            )
        })
        .collect();
    lines.push(format!(
        "{}: {} ({} items)",
        t.t("cart.total"),
        format_amount(state.total()),
        state.item_count()
    ));
    lines.join("\n")
}
