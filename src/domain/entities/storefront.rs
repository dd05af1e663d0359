//! Storefront URL layout.

/// The storefront whose offers are tracked, e.g. `epicgames`.
///
/// All public URLs are derived from the storefront name:
/// `https://store.<name>.com/...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storefront {
    name: String,
}

impl Storefront {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storefront home page, used as the fallback link for feed entries.
    pub fn home_url(&self) -> String {
        format!("https://store.{}.com/", self.name)
    }

    /// Prefix for product pages; the page slug is appended directly.
    pub fn page_base(&self) -> String {
        format!("https://store.{}.com/p/", self.name)
    }

    pub fn page_url(&self, slug: &str) -> String {
        format!("{}{}", self.page_base(), slug)
    }

    pub fn purchase_base(&self) -> String {
        format!("https://store.{}.com/purchase?", self.name)
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new("epicgames")
    }
}
