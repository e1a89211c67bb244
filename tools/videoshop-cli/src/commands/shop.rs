//! Interactive storefront session.

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tokio::sync::broadcast::{self, error::TryRecvError};
use videoshop_commerce::checkout::CheckoutRequest;
use videoshop_commerce::events::StoreEvent;
use videoshop_commerce::storefront::{Storefront, Tab};
use videoshop_commerce::{CheckoutError, ItemId, ValidationError};
use videoshop_intake::HttpOrderIntake;

use super::ShopArgs;
use crate::context::Context;
use crate::output::{cart_tab_label, Output};

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("The shop is interactive; --json is not supported here");
    }

    let endpoint = args
        .endpoint
        .as_deref()
        .or(ctx.config.intake.endpoint.as_deref())
        .context("No order endpoint configured. Set [intake] endpoint in videoshop.toml or pass --endpoint")?;
    let intake = HttpOrderIntake::new(endpoint, ctx.config.intake.timeouts())?;
    let timeout = intake.timeout();
    ctx.output.debug(&format!(
        "Orders go to {} (connect {:?}, total {:?})",
        intake.endpoint(),
        timeout.connect,
        timeout.total
    ));

    let shop = Storefront::new(ctx.config.build_catalog()?, Arc::new(intake))
        .with_currency(ctx.config.currency()?)
        .with_history(ctx.config.build_history())
        .with_support(ctx.config.build_support());

    let mut session = Session {
        events: shop.subscribe(),
        shop,
        output: &ctx.output,
        theme: ColorfulTheme::default(),
    };

    println!(
        "{}\n{}",
        style(&ctx.config.shop.name).bold().cyan(),
        style(&ctx.config.shop.tagline).dim()
    );
    session.main_menu().await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CartAction {
    Checkout,
    Remove(ItemId),
    Back,
}

/// Actions offered on the cart tab. Checkout is withheld while an order
/// is in flight.
fn cart_actions(shop: &Storefront) -> Vec<(String, CartAction)> {
    let mut actions = Vec::with_capacity(shop.cart().line_count() + 2);
    if !shop.cart().is_empty() && !shop.submit_state().is_pending() {
        actions.push(("Checkout".to_string(), CartAction::Checkout));
    }
    for line in shop.cart().lines() {
        actions.push((format!("Remove {}", line.item().title), CartAction::Remove(line.id())));
    }
    actions.push(("Back".to_string(), CartAction::Back));
    actions
}

struct Session<'a> {
    shop: Storefront,
    events: broadcast::Receiver<StoreEvent>,
    output: &'a Output,
    theme: ColorfulTheme,
}

impl Session<'_> {
    async fn main_menu(&mut self) -> Result<()> {
        loop {
            let mut labels: Vec<String> = Tab::ALL
                .iter()
                .map(|tab| match tab {
                    Tab::Cart => cart_tab_label(self.shop.cart().summary().badge()),
                    other => other.display_name().to_string(),
                })
                .collect();
            labels.push("Quit".to_string());

            let current = Tab::ALL
                .iter()
                .position(|tab| *tab == self.shop.active_tab())
                .unwrap_or(0);

            let choice = Select::with_theme(&self.theme)
                .items(&labels)
                .default(current)
                .interact_opt()?;

            let Some(tab) = choice.and_then(|i| Tab::ALL.get(i).copied()) else {
                break;
            };

            self.shop.select_tab(tab);
            self.render_events();
            match tab {
                Tab::Catalog => self.catalog_tab()?,
                Tab::Cart => self.cart_tab().await?,
                Tab::Profile => self.profile_tab(),
                Tab::Support => self.support_tab(),
            }
        }

        if !self.shop.cart().is_empty() {
            self.output.warn("Your cart was not checked out.");
        }
        Ok(())
    }

    fn catalog_tab(&mut self) -> Result<()> {
        loop {
            let currency = self.shop.currency();
            let catalog = self.shop.catalog();

            let mut ids: Vec<ItemId> = Vec::with_capacity(catalog.len());
            let mut labels: Vec<String> = Vec::with_capacity(catalog.len() + 1);
            for (category, items) in catalog.grouped() {
                for item in items {
                    let in_cart = self
                        .shop
                        .cart()
                        .get(item.id)
                        .map(|line| format!(" {}", style(format!("×{}", line.quantity())).cyan()))
                        .unwrap_or_default();
                    labels.push(format!(
                        "[{}] {} · {} · {}{}",
                        category,
                        item.title,
                        item.duration,
                        item.price(currency),
                        in_cart
                    ));
                    ids.push(item.id);
                }
            }
            labels.push("Back".to_string());

            let choice = Select::with_theme(&self.theme)
                .with_prompt("Add a lesson to the cart")
                .items(&labels)
                .default(0)
                .interact_opt()?;

            let Some(id) = choice.and_then(|i| ids.get(i).copied()) else {
                return Ok(());
            };

            let quantity = self.shop.add_to_cart(id)?;
            if let Some(item) = self.shop.catalog().get(id) {
                self.output
                    .success(&format!("Added {} (×{quantity})", item.title));
            }
            self.render_events();
        }
    }

    async fn cart_tab(&mut self) -> Result<()> {
        loop {
            let cart = self.shop.cart();
            if cart.is_empty() {
                self.output.info("Your cart is empty.");
                return Ok(());
            }

            let currency = self.shop.currency();
            self.output.header("Cart");
            for line in cart.lines() {
                self.output.kv(
                    &line.item().title,
                    &format!(
                        "{} × {} = {}",
                        line.quantity(),
                        line.item().price(currency),
                        self.shop.money(line.subtotal())
                    ),
                );
            }
            println!(
                "  {} {}",
                style("Total:").bold(),
                style(self.shop.money(self.shop.total())).bold().green()
            );

            let actions = cart_actions(&self.shop);
            let labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();

            let choice = Select::with_theme(&self.theme)
                .items(&labels)
                .default(0)
                .interact_opt()?;

            match choice.and_then(|i| actions.get(i)).map(|(_, action)| *action) {
                Some(CartAction::Checkout) => {
                    if self.checkout_dialog().await? {
                        return Ok(());
                    }
                }
                Some(CartAction::Remove(id)) => {
                    self.shop.remove_from_cart(id);
                    self.render_events();
                }
                Some(CartAction::Back) | None => return Ok(()),
            }
        }
    }

    /// Returns true once an order was placed.
    async fn checkout_dialog(&mut self) -> Result<bool> {
        self.shop.open_checkout()?;
        self.render_events();

        loop {
            let form = self.shop.form();
            let name: String = Input::with_theme(&self.theme)
                .with_prompt("Your name")
                .with_initial_text(form.customer_name.clone())
                .allow_empty(true)
                .interact_text()?;
            let contact: String = Input::with_theme(&self.theme)
                .with_prompt("Telegram or phone")
                .with_initial_text(form.customer_contact.clone())
                .allow_empty(true)
                .interact_text()?;
            self.shop.set_customer_name(name);
            self.shop.set_customer_contact(contact);

            // Preview only; the submitter validates again and builds its own.
            if let Ok((name, contact)) = self.shop.form().validate() {
                let preview = CheckoutRequest::from_cart(name, contact, self.shop.cart());
                self.output.header("Order");
                for line in preview.summary_lines(self.shop.currency()) {
                    println!("  {line}");
                }
                println!(
                    "  {} {}",
                    style("Total:").bold(),
                    preview.total(self.shop.currency())
                );
            }

            let confirmed = Confirm::with_theme(&self.theme)
                .with_prompt("Place order?")
                .default(true)
                .interact()?;
            if !confirmed {
                self.shop.close_checkout();
                self.render_events();
                return Ok(false);
            }

            let spinner = self.output.spinner("Sending order...");
            let result = self.shop.checkout().await;
            spinner.finish_and_clear();
            self.render_events();

            match result {
                Ok(_) => return Ok(true),
                Err(CheckoutError::Validation(ValidationError::EmptyCart)) => {
                    self.shop.close_checkout();
                    return Ok(false);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "checkout did not complete");
                    let again = Confirm::with_theme(&self.theme)
                        .with_prompt("Try again?")
                        .default(true)
                        .interact()?;
                    if !again {
                        self.shop.close_checkout();
                        self.render_events();
                        return Ok(false);
                    }
                }
            }
        }
    }

    fn profile_tab(&self) {
        let history = self.shop.history();
        let currency = self.shop.currency();

        self.output.header("Profile");
        self.output.kv("Lessons purchased", &history.count().to_string());
        self.output
            .kv("Total spent", &history.total_spent_money(currency).to_string());

        if history.is_empty() {
            self.output.info("No purchases yet.");
            return;
        }
        for item in history.purchases() {
            self.output.list_item(&format!(
                "{} · {} · {}",
                item.title,
                item.duration,
                item.price(currency)
            ));
        }
    }

    fn support_tab(&self) {
        let support = self.shop.support();

        self.output.header("Support");
        for contact in &support.contacts {
            self.output
                .kv(&contact.label, &format!("{} ({})", contact.handle, contact.url));
        }

        if !support.faq.is_empty() {
            self.output.header("FAQ");
            for entry in &support.faq {
                println!("  {}", style(&entry.question).bold());
                println!("    {}", entry.answer);
            }
        }
    }

    /// Drain pending storefront events and show notifications.
    fn render_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(StoreEvent::Notification(notification)) => self.output.notification(&notification),
                Ok(StoreEvent::CartChanged(summary)) => self.output.debug(&format!(
                    "cart: {} lines, {} items, total {}",
                    summary.line_count,
                    summary.item_count,
                    self.shop.money(summary.total)
                )),
                Ok(event) => self.output.debug(&format!("{event:?}")),
                Err(TryRecvError::Lagged(skipped)) => {
                    self.output.debug(&format!("skipped {skipped} events"))
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videoshop_commerce::catalog::Catalog;
    use videoshop_intake::TimeoutConfig;

    fn shop() -> Storefront {
        let intake =
            HttpOrderIntake::new("http://127.0.0.1:9/send-order", TimeoutConfig::default()).unwrap();
        Storefront::new(Catalog::builtin(), Arc::new(intake))
    }

    #[test]
    fn test_cart_actions_for_filled_cart() {
        let mut shop = shop();
        shop.add_to_cart(ItemId::new(1)).unwrap();
        shop.add_to_cart(ItemId::new(3)).unwrap();

        let actions: Vec<CartAction> = cart_actions(&shop).into_iter().map(|(_, a)| a).collect();
        assert_eq!(
            actions,
            vec![
                CartAction::Checkout,
                CartAction::Remove(ItemId::new(1)),
                CartAction::Remove(ItemId::new(3)),
                CartAction::Back,
            ]
        );
    }

    #[test]
    fn test_no_checkout_for_empty_cart() {
        let actions: Vec<CartAction> = cart_actions(&shop()).into_iter().map(|(_, a)| a).collect();
        assert_eq!(actions, vec![CartAction::Back]);
    }
}
