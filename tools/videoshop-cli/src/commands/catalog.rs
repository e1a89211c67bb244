//! Catalog listing command.

use anyhow::{bail, Result};
use videoshop_commerce::catalog::CatalogItem;
use videoshop_commerce::Currency;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{truncate, Output};

const COLUMN_WIDTHS: [usize; 5] = [4, 28, 9, 14, 10];

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.config.build_catalog()?;
    let currency = ctx.config.currency()?;

    let items: Vec<&CatalogItem> = match args.category.as_deref() {
        Some(category) => {
            let items: Vec<_> = catalog.by_category(category).collect();
            if items.is_empty() {
                bail!(
                    "No lessons in category '{}'. Known categories: {}",
                    category,
                    catalog.categories().join(", ")
                );
            }
            items
        }
        None => catalog.items().iter().collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header(&format!("{} catalog", ctx.config.shop.name));
    print_table(&ctx.output, &items, currency);
    ctx.output.info(&format!("{} lessons", items.len()));

    Ok(())
}

/// Print catalog items as a table.
fn print_table(output: &Output, items: &[&CatalogItem], currency: Currency) {
    output.table_row(&["ID", "Title", "Duration", "Category", "Price"], &COLUMN_WIDTHS);
    for item in items {
        output.table_row(
            &[
                &item.id.to_string(),
                &truncate(&item.title, COLUMN_WIDTHS[1]),
                &item.duration,
                &item.category,
                &item.price(currency).to_string(),
            ],
            &COLUMN_WIDTHS,
        );
    }
}
