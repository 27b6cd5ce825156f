//! Checkout and order summary commands.

use chrono::Utc;
use sts_core::format_amount;
use sts_storefront::i18n::Translator;
use sts_storefront::services::checkout::{self, CheckoutForm, OrderSummary};

use super::{CommandError, Context, emit};

/// Place an order for the current cart.
pub async fn place(ctx: &Context, form: CheckoutForm) -> Result<(), CommandError> {
    let state = ctx.state();
    let order = {
        let mut cart = state.cart().lock().await;
        checkout::submit(&mut cart, state.store(), form, Utc::now())?
    };

    let t = ctx.translator().await;
    emit(&format!(
        "{}: {}\n{}: {}",
        t.t("order.orderNumber"),
        order.order_number,
        t.t("order.totalAmount"),
        format_amount(order.total)
    ));
    Ok(())
}

/// Show the last order.
///
/// Empties the cart. The first call for an order prints the notification
/// link; later calls print the share link.
pub async fn summary(ctx: &Context) -> Result<(), CommandError> {
    let state = ctx.state();
    let t = ctx.translator().await;
    let mut cart = state.cart().lock().await;
    let summary =
        checkout::load_summary(&mut cart, state.store(), t, &state.config().whatsapp_number)
            .ok_or_else(|| CommandError::NotFound("no order has been placed".to_string()))?;
    drop(cart);

    emit(&render_summary(&summary, t));
    Ok(())
}

/// The order message followed by the chat link.
pub fn render_summary(summary: &OrderSummary, t: Translator) -> String {
    let link = summary
        .notification_url
        .as_ref()
        .unwrap_or(&summary.share_url);
    format!(
        "{}\n\n{}: {link}",
        checkout::order_message(&summary.order, t),
        t.t("order.whatsapp")
    )
}
