//! Outbound order notification.
//!
//! The order is handed off as a chat deep link whose text is a localized,
//! plain-text summary of the order.

use sts_core::format_amount;

use super::OrderData;
use crate::i18n::Translator;

/// Base URL of the chat deep link.
pub const DEEP_LINK_BASE: &str = "https://wa.me/";

/// Render the order as a chat message in the translator's language.
#[must_use]
pub fn order_message(order: &OrderData, t: Translator) -> String {
    let info = &order.customer_info;
    let mut lines = vec![
        format!("🛍️ *{}*", t.t("order.newOrder")),
        String::new(),
        format!("📋 *{}:* {}", t.t("order.orderNumber"), order.order_number),
        String::new(),
        format!("👤 *{}:*", t.t("order.customerInfo")),
        format!("• {}: {}", t.t("cart.name"), info.name),
        format!("• {}: {}", t.t("cart.phone"), info.phone),
        format!("• {}: {}", t.t("cart.city"), info.city),
        format!(
            "• {}: {}",
            t.t("cart.payment"),
            t.t(info.payment_method.label_key())
        ),
    ];

    let delivery = info.delivery_details();
    if !delivery.is_empty() {
        lines.push(String::new());
        lines.push(format!("📦 *{}:*", t.t("cart.deliveryInfo")));
        lines.extend(
            delivery
                .into_iter()
                .map(|(key, value)| format!("• {}: {value}", t.t(key))),
        );
    }

    lines.push(String::new());
    lines.push(format!("🛒 *{}:*", t.t("order.orderItems")));
    lines.extend(order.items.iter().map(|item| {
        let color = item
            .selected_color
            .as_ref()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        format!(
            "• {}{color} - {}: {} - {}",
            item.product.name,
            t.t("cart.quantity"),
            item.quantity,
            item.product.price
        )
    }));

    lines.push(String::new());
    lines.push(format!(
        "💰 *{}: {}*",
        t.t("order.totalAmount"),
        format_amount(order.total)
    ));
    lines.push(String::new());
    lines.push(t.t("order.thankYouMessage").to_string());

    lines.join("\n")
}

/// Build the deep link for `number` with `message` as pre-filled text.
#[must_use]
pub fn deep_link(number: &str, message: &str) -> String {
    format!("{DEEP_LINK_BASE}{number}?text={}", urlencoding::encode(message))
}
