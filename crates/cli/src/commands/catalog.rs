//! Catalog browsing commands.

use std::fmt::Write as _;

use sts_core::{Product, ProductId, format_amount};
use sts_storefront::catalog::{ProductRepository, ProductSort};
use sts_storefront::i18n::Translator;

use super::{CommandError, Context, emit};

/// List products matching every given filter.
pub async fn list(
    ctx: &Context,
    category: Option<&str>,
    brand: Option<&str>,
    featured: bool,
    sort: &str,
) -> Result<(), CommandError> {
    let catalog = ctx.state().catalog();
    let mut products = match category {
        Some(category) => catalog.by_category(category).await?,
        None => catalog.all().await?,
    };
    products.retain(|p| brand.is_none_or(|b| p.brand == b) && (!featured || p.featured));
    ProductSort::parse(sort).apply(&mut products);

    let t = ctx.translator().await;
    emit(&render_list(&products, t));
    Ok(())
}

/// Show one product in detail.
pub async fn show(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let product = ctx
        .state()
        .catalog()
        .by_id(&ProductId::new(id))
        .await?
        .ok_or_else(|| CommandError::NotFound(format!("product {id}")))?;

    let t = ctx.translator().await;
    emit(&render_product(&product, t));
    Ok(())
}

/// One line per product: ID, name, brand and price.
pub fn render_list(products: &[Product], t: Translator) -> String {
    if products.is_empty() {
        return t.t("common.noResults").to_string();
    }
    products
        .iter()
        .map(|p| {
            let mut line = format!(
                "{:>3}  {:<32} {:<12} {}",
                p.id,
                p.name,
                t.t(&format!("brand.{}", p.brand)),
                format_amount(p.price.amount())
            );
            if !p.in_stock {
                let _ = write!(line, " ({})", t.t("product.outOfStock"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_product(product: &Product, t: Translator) -> String {
    let mut out = format!(
        "{} ({})\n{}\n",
        product.name,
        product.id,
        format_amount(product.price.amount())
    );
    let _ = writeln!(
        out,
        "{}: {}",
        t.t("product.category"),
        t.t(&format!("category.{}", product.category))
    );
    let _ = writeln!(
        out,
        "{}: {}",
        t.t("product.brand"),
        t.t(&format!("brand.{}", product.brand))
    );
    if !product.colors.is_empty() {
        let _ = writeln!(out, "{}: {}", t.t("product.colors"), product.colors.join(", "));
    }
    if !product.in_stock {
        let _ = writeln!(out, "{}", t.t("product.outOfStock"));
    }
    out.push_str(&product.description);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sts_core::Language;
    use sts_storefront::catalog::Catalog;

    use super::*;

    #[test]
    fn test_render_list_shows_price_and_brand() {
        let catalog = Catalog::demo();
        let t = Translator::new(Language::En);
        let iphone = catalog.get(&ProductId::new("1")).unwrap().clone();

        let out = render_list(&[iphone], t);
        assert!(out.contains("iPhone 15 Pro Max"));
        assert!(out.contains("$1299.00"));
        assert!(out.contains("Apple"));
    }

    #[test]
    fn test_render_empty_list() {
        let t = Translator::new(Language::En);
        assert_eq!(render_list(&[], t), t.t("common.noResults"));
    }

    #[test]
    fn test_render_product_lists_colors() {
        let catalog = Catalog::demo();
        let iphone = catalog.get(&ProductId::new("1")).unwrap();

        let out = render_product(iphone, Translator::new(Language::En));
        assert!(out.contains(&iphone.colors.join(", ")));
    }
}
