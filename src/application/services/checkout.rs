//! Combined checkout link construction.

use crate::domain::entities::{OfferIdentity, OfferSet, Storefront};

/// Fragment that opens the payment step directly.
pub const PAYMENT_FRAGMENT: &str = "#/purchase/payment-methods";

/// Result of building a checkout link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutLink {
    /// There was nothing to put in the link.
    NoOffers,
    Url(String),
}

impl CheckoutLink {
    pub fn url(&self) -> Option<&str> {
        match self {
            CheckoutLink::NoOffers => None,
            CheckoutLink::Url(url) => Some(url),
        }
    }
}

/// Builds `https://store.<storefront>.com/purchase?offers=1-ns-id&...` links.
#[derive(Debug, Clone)]
pub struct CheckoutUrlBuilder {
    storefront: Storefront,
}

impl CheckoutUrlBuilder {
    pub fn new(storefront: Storefront) -> Self {
        Self { storefront }
    }

    /// Builds the link for a whole offer set.
    ///
    /// Members are sorted by `(namespace, id)` first, so any permutation of
    /// the same set yields a byte-identical URL.
    pub fn build(&self, offers: &OfferSet) -> CheckoutLink {
        self.build_in_order(offers.sorted())
    }

    /// Builds the link keeping the caller's order and duplicates as given.
    pub fn build_in_order<'a, I>(&self, offers: I) -> CheckoutLink
    where
        I: IntoIterator<Item = &'a OfferIdentity>,
    {
        let segments: Vec<String> = offers
            .into_iter()
            .map(OfferIdentity::checkout_segment)
            .collect();

        if segments.is_empty() {
            return CheckoutLink::NoOffers;
        }

        CheckoutLink::Url(format!(
            "{}{}{}",
            self.storefront.purchase_base(),
            segments.join("&"),
            PAYMENT_FRAGMENT
        ))
    }
}
