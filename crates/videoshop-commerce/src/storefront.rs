//! The storefront session: catalog, cart, checkout form and submitter.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::{CheckoutSubmitter, ContactForm, OrderAck, OrderIntake, SubmitState};
use crate::error::{CheckoutError, CommerceError};
use crate::events::{Notification, StoreEvent};
use crate::ids::ItemId;
use crate::money::{Currency, Money};
use crate::profile::PurchaseHistory;
use crate::support::SupportInfo;

const EVENT_CAPACITY: usize = 64;

/// Top-level views of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Catalog,
    Cart,
    Profile,
    Support,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Catalog, Tab::Cart, Tab::Profile, Tab::Support];

    pub fn display_name(&self) -> &'static str {
        match self {
            Tab::Catalog => "Catalog",
            Tab::Cart => "Cart",
            Tab::Profile => "Profile",
            Tab::Support => "Support",
        }
    }
}

/// One shopping session.
///
/// Owns the cart exclusively; every change is announced on the event
/// channel returned by [`Storefront::subscribe`].
pub struct Storefront {
    catalog: Catalog,
    currency: Currency,
    cart: Cart,
    form: ContactForm,
    submitter: CheckoutSubmitter,
    history: PurchaseHistory,
    support: SupportInfo,
    active_tab: Tab,
    events: broadcast::Sender<StoreEvent>,
}

impl Storefront {
    /// Start a session with an empty cart.
    pub fn new(catalog: Catalog, intake: Arc<dyn OrderIntake>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            catalog,
            currency: Currency::default(),
            cart: Cart::new(),
            form: ContactForm::new(),
            submitter: CheckoutSubmitter::new(intake),
            history: PurchaseHistory::default(),
            support: SupportInfo::default(),
            active_tab: Tab::default(),
            events,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_history(mut self, history: PurchaseHistory) -> Self {
        self.history = history;
        self
    }

    pub fn with_support(mut self, support: SupportInfo) -> Self {
        self.support = support;
        self
    }

    /// Receive future events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn history(&self) -> &PurchaseHistory {
        &self.history
    }

    pub fn support(&self) -> &SupportInfo {
        &self.support
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submitter.state()
    }

    /// Format an amount in the shop currency.
    pub fn money(&self, amount: u64) -> Money {
        Money::new(amount, self.currency)
    }

    /// Cart total in minor units.
    pub fn total(&self) -> u64 {
        self.cart.total()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.emit(StoreEvent::TabChanged(tab));
        }
    }

    /// Add one unit of a catalog item to the cart.
    ///
    /// Returns the line's new quantity.
    pub fn add_to_cart(&mut self, id: ItemId) -> Result<u32, CommerceError> {
        let item = self.catalog.get(id).ok_or(CommerceError::ItemNotFound(id))?;
        let quantity = self.cart.add_item(item).get();
        tracing::debug!(item_id = %id, quantity, "added to cart");
        self.emit_cart_changed();
        Ok(quantity)
    }

    /// Remove an item's line; unknown ids are ignored.
    pub fn remove_from_cart(&mut self, id: ItemId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            tracing::debug!(item_id = %id, "removed from cart");
            self.emit_cart_changed();
        }
        removed
    }

    /// Show the checkout dialog. Requires a non-empty cart.
    pub fn open_checkout(&mut self) -> Result<(), CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::CheckoutUnavailable("cart is empty".to_string()));
        }
        if !self.form.dialog_open {
            self.form.open_dialog();
            self.emit(StoreEvent::CheckoutDialog { open: true });
        }
        Ok(())
    }

    pub fn close_checkout(&mut self) {
        if self.form.dialog_open {
            self.form.close_dialog();
            self.emit(StoreEvent::CheckoutDialog { open: false });
        }
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.form.set_customer_name(name);
    }

    pub fn set_customer_contact(&mut self, contact: impl Into<String>) {
        self.form.set_customer_contact(contact);
    }

    /// Submit the cart with the current form fields.
    ///
    /// Every outcome is announced as a notification. Success also empties
    /// the cart and closes the dialog.
    pub async fn checkout(&mut self) -> Result<OrderAck, CheckoutError> {
        let dialog_was_open = self.form.dialog_open;
        let result = self.submitter.submit(&mut self.form, &mut self.cart).await;

        match &result {
            Ok(ack) => {
                self.emit_cart_changed();
                if dialog_was_open {
                    self.emit(StoreEvent::CheckoutDialog { open: false });
                }
                let message = ack
                    .message
                    .clone()
                    .unwrap_or_else(|| "We will contact you shortly.".to_string());
                self.emit(StoreEvent::Notification(Notification::success(
                    "Order placed",
                    message,
                )));
            }
            Err(e @ CheckoutError::Validation(_)) => {
                self.emit(StoreEvent::Notification(Notification::error(
                    "Check your details",
                    e.user_message(),
                )));
            }
            Err(e @ CheckoutError::Submission(_)) => {
                self.emit(StoreEvent::Notification(Notification::error(
                    "Order failed",
                    e.user_message(),
                )));
            }
            Err(e @ CheckoutError::AlreadyPending) => {
                self.emit(StoreEvent::Notification(Notification::info(
                    "Please wait",
                    e.user_message(),
                )));
            }
        }

        result
    }

    fn emit_cart_changed(&self) {
        self.emit(StoreEvent::CartChanged(self.cart.summary()));
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog_items", &self.catalog.len())
            .field("cart", &self.cart.summary())
            .field("active_tab", &self.active_tab)
            .field("submitter", &self.submitter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartSummary;
    use crate::error::{SubmissionError, ValidationError};
    use crate::events::NotificationLevel;
    use crate::test_support::FakeIntake;

    fn drain(rx: &mut broadcast::Receiver<StoreEvent>) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn notifications(events: &[StoreEvent]) -> Vec<&Notification> {
        events
            .iter()
            .filter_map(|e| match e {
                StoreEvent::Notification(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn storefront(intake: Arc<FakeIntake>) -> Storefront {
        Storefront::new(Catalog::builtin(), intake)
    }

    #[test]
    fn test_add_emits_cart_changed() {
        let mut shop = storefront(Arc::new(FakeIntake::accepting()));
        let mut rx = shop.subscribe();

        shop.add_to_cart(ItemId::new(1)).unwrap();
        shop.add_to_cart(ItemId::new(1)).unwrap();
        shop.add_to_cart(ItemId::new(2)).unwrap();

        assert_eq!(shop.total(), 4597);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 3);
        assert_eq!(
            events.last(),
            Some(&StoreEvent::CartChanged(CartSummary { line_count: 2, item_count: 3, total: 4597 }))
        );
    }

    #[test]
    fn test_add_unknown_item() {
        let mut shop = storefront(Arc::new(FakeIntake::accepting()));
        let err = shop.add_to_cart(ItemId::new(999)).unwrap_err();
        assert!(matches!(err, CommerceError::ItemNotFound(id) if id == ItemId::new(999)));
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_remove_absent_item_emits_nothing() {
        let mut shop = storefront(Arc::new(FakeIntake::accepting()));
        let mut rx = shop.subscribe();

        assert!(!shop.remove_from_cart(ItemId::new(999)));
        assert!(shop.cart().is_empty());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_open_checkout_requires_items() {
        let mut shop = storefront(Arc::new(FakeIntake::accepting()));
        assert!(matches!(shop.open_checkout(), Err(CommerceError::CheckoutUnavailable(_))));

        shop.add_to_cart(ItemId::new(3)).unwrap();
        shop.open_checkout().unwrap();
        assert!(shop.form().dialog_open);

        shop.close_checkout();
        assert!(!shop.form().dialog_open);
    }

    #[test]
    fn test_select_tab() {
        let mut shop = storefront(Arc::new(FakeIntake::accepting()));
        let mut rx = shop.subscribe();

        shop.select_tab(Tab::Catalog);
        shop.select_tab(Tab::Support);

        assert_eq!(shop.active_tab(), Tab::Support);
        assert_eq!(drain(&mut rx), vec![StoreEvent::TabChanged(Tab::Support)]);
    }

    #[tokio::test]
    async fn test_checkout_success_flow() {
        let intake = Arc::new(FakeIntake::accepting());
        let mut shop = storefront(intake.clone());
        shop.add_to_cart(ItemId::new(1)).unwrap();
        shop.add_to_cart(ItemId::new(2)).unwrap();
        shop.open_checkout().unwrap();
        shop.set_customer_name("Anna");
        shop.set_customer_contact("+1 555 0100");
        let mut rx = shop.subscribe();

        shop.checkout().await.unwrap();

        assert!(shop.cart().is_empty());
        assert_eq!(shop.form(), &ContactForm::default());
        assert_eq!(shop.submit_state(), SubmitState::Idle);

        let events = drain(&mut rx);
        assert!(events.contains(&StoreEvent::CartChanged(CartSummary::default())));
        assert!(events.contains(&StoreEvent::CheckoutDialog { open: false }));
        let notes = notifications(&events);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Success);
        assert_eq!(notes[0].message, "Order sent");
        assert_eq!(intake.requests()[0].customer_contact, "+1 555 0100");
    }

    #[tokio::test]
    async fn test_checkout_failure_keeps_cart_and_form() {
        let intake = Arc::new(FakeIntake::failing(SubmissionError::Transport(
            "connection refused".to_string(),
        )));
        let mut shop = storefront(intake.clone());
        shop.add_to_cart(ItemId::new(1)).unwrap();
        shop.open_checkout().unwrap();
        shop.set_customer_name("Anna");
        shop.set_customer_contact("@anna");
        let cart_before = shop.cart().clone();
        let form_before = shop.form().clone();
        let mut rx = shop.subscribe();

        let err = shop.checkout().await.unwrap_err();

        assert!(matches!(err, CheckoutError::Submission(_)));
        assert_eq!(shop.cart(), &cart_before);
        assert_eq!(shop.form(), &form_before);
        assert_eq!(shop.submit_state(), SubmitState::Idle);

        let events = drain(&mut rx);
        let notes = notifications(&events);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert!(!notes[0].message.contains("refused"));

        // retry succeeds once the service recovers
        intake.set_outcome(Ok(OrderAck::default()));
        shop.checkout().await.unwrap();
        assert!(shop.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_validation_notifies_without_network() {
        let intake = Arc::new(FakeIntake::accepting());
        let mut shop = storefront(intake.clone());
        shop.add_to_cart(ItemId::new(1)).unwrap();
        shop.set_customer_contact("@anna");
        let mut rx = shop.subscribe();

        let err = shop.checkout().await.unwrap_err();

        assert!(matches!(err, CheckoutError::Validation(ValidationError::MissingField(_))));
        assert_eq!(intake.calls(), 0);
        assert_eq!(shop.cart().line_count(), 1);

        let events = drain(&mut rx);
        let notes = notifications(&events);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert!(!events.iter().any(|e| matches!(e, StoreEvent::CartChanged(_))));
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(StoreEvent::TabChanged(Tab::Cart)).unwrap();
        assert_eq!(json["type"], "tab_changed");
        assert_eq!(json["data"], "cart");
    }
}
