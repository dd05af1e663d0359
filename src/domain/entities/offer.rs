//! Offer identity and the set type used to accumulate offers across sources.

use std::collections::HashSet;
use std::collections::hash_set;

/// The `(namespace, id)` pair identifying a purchasable catalog entry.
///
/// Both parts are guaranteed non-empty; construction through [`OfferIdentity::new`]
/// rejects blank input so incomplete identities never reach an [`OfferSet`].
///
/// Ordering is lexicographic on `namespace`, then `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OfferIdentity {
    namespace: String,
    id: String,
}

impl OfferIdentity {
    /// Creates an identity, returning `None` if either part is empty.
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Option<Self> {
        let namespace = namespace.into();
        let id = id.into();

        if namespace.is_empty() || id.is_empty() {
            return None;
        }

        Some(Self { namespace, id })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Renders the checkout query segment, e.g. `offers=1-ns-id`.
    pub fn checkout_segment(&self) -> String {
        format!("offers=1-{}-{}", self.namespace, self.id)
    }
}

/// An unordered set of offer identities.
///
/// Produced per source by the extractors and unioned into the combined set
/// by [`crate::application::services::offer_collector::merge_offer_sets`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferSet {
    offers: HashSet<OfferIdentity>,
}

impl OfferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an identity. Returns `true` if it was not already present.
    pub fn insert(&mut self, offer: OfferIdentity) -> bool {
        self.offers.insert(offer)
    }

    pub fn contains(&self, offer: &OfferIdentity) -> bool {
        self.offers.contains(offer)
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, OfferIdentity> {
        self.offers.iter()
    }

    /// Adds every member of `other` to this set.
    pub fn absorb(&mut self, other: OfferSet) {
        self.offers.extend(other.offers);
    }

    /// Members sorted by `(namespace, id)`.
    pub fn sorted(&self) -> Vec<&OfferIdentity> {
        let mut members: Vec<&OfferIdentity> = self.offers.iter().collect();
        members.sort();
        members
    }
}

impl FromIterator<OfferIdentity> for OfferSet {
    fn from_iter<T: IntoIterator<Item = OfferIdentity>>(iter: T) -> Self {
        Self {
            offers: iter.into_iter().collect(),
        }
    }
}

impl Extend<OfferIdentity> for OfferSet {
    fn extend<T: IntoIterator<Item = OfferIdentity>>(&mut self, iter: T) {
        self.offers.extend(iter);
    }
}

impl IntoIterator for OfferSet {
    type Item = OfferIdentity;
    type IntoIter = hash_set::IntoIter<OfferIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.offers.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(ns: &str, id: &str) -> OfferIdentity {
        OfferIdentity::new(ns, id).unwrap()
    }

    #[test]
    fn test_identity_rejects_empty_parts() {
        assert!(OfferIdentity::new("", "id").is_none());
        assert!(OfferIdentity::new("ns", "").is_none());
        assert!(OfferIdentity::new("ns", "id").is_some());
    }

    #[test]
    fn test_checkout_segment() {
        assert_eq!(offer("ns1", "id1").checkout_segment(), "offers=1-ns1-id1");
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let mut set = OfferSet::new();
        assert!(set.insert(offer("ns", "a")));
        assert!(!set.insert(offer("ns", "a")));
        assert!(set.insert(offer("ns", "b")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_sorted_orders_by_namespace_then_id() {
        let set: OfferSet = [offer("b", "1"), offer("a", "2"), offer("a", "10")]
            .into_iter()
            .collect();

        let sorted: Vec<(&str, &str)> = set
            .sorted()
            .into_iter()
            .map(|o| (o.namespace(), o.id()))
            .collect();

        assert_eq!(sorted, vec![("a", "10"), ("a", "2"), ("b", "1")]);
    }
}
