//! Media Path Resolver
//!
//! Pure mapping between stored relative file paths and public URLs.
//! The configured base URL lives here and nowhere else; read paths go
//! through [`MediaResolver::to_public_url`], write paths strip it back
//! off with [`MediaResolver::to_stored_path`] so the base never leaks
//! into storage.

use crate::db::models::{CartItemExpanded, OrderExpanded, Product, ProductExpanded, WishlistItemExpanded};

#[derive(Debug, Clone)]
pub struct MediaResolver {
    base_url: String,
}

impl MediaResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Map a stored relative path to a publicly addressable URL.
    /// Paths that already carry a URL scheme pass through unchanged.
    pub fn to_public_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Inverse of [`to_public_url`]: strip the configured base when
    /// present, identity otherwise.
    ///
    /// [`to_public_url`]: MediaResolver::to_public_url
    pub fn to_stored_path(&self, url: &str) -> String {
        url.strip_prefix(&self.base_url).unwrap_or(url).to_string()
    }

    /// Rewrite thumbnail and image paths of an expanded product to
    /// public URLs. Applied to every product response uniformly.
    pub fn rewrite_product(&self, mut product: ProductExpanded) -> ProductExpanded {
        product.thumbnail = product.thumbnail.map(|p| self.to_public_url(&p));
        product.images = product
            .images
            .into_iter()
            .map(|p| self.to_public_url(&p))
            .collect();
        product
    }

    /// In-place variant for products embedded in other responses.
    pub fn rewrite_embedded(&self, product: &mut Product) {
        if let Some(thumb) = product.thumbnail.take() {
            product.thumbnail = Some(self.to_public_url(&thumb));
        }
        for image in &mut product.images {
            *image = self.to_public_url(image);
        }
    }

    pub fn rewrite_order(&self, order: &mut OrderExpanded) {
        for item in &mut order.items {
            self.rewrite_embedded(&mut item.product);
        }
    }

    pub fn rewrite_cart_item(&self, item: &mut CartItemExpanded) {
        self.rewrite_embedded(&mut item.product);
    }

    pub fn rewrite_wishlist_item(&self, item: &mut WishlistItemExpanded) {
        self.rewrite_embedded(&mut item.product);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> MediaResolver {
        MediaResolver::new("http://localhost:8000/")
    }

    #[test]
    fn relative_path_gets_base_prefix() {
        assert_eq!(
            resolver().to_public_url("uploads/images/a.jpg"),
            "http://localhost:8000/uploads/images/a.jpg"
        );
    }

    #[test]
    fn absolute_url_passes_through() {
        let url = "https://cdn.example.com/x.jpg";
        assert_eq!(resolver().to_public_url(url), url);
    }

    #[test]
    fn stored_path_strips_known_base_only() {
        let r = resolver();
        assert_eq!(
            r.to_stored_path("http://localhost:8000/uploads/images/a.jpg"),
            "uploads/images/a.jpg"
        );
        assert_eq!(r.to_stored_path("uploads/images/a.jpg"), "uploads/images/a.jpg");
    }

    #[test]
    fn round_trip_is_identity_for_relative_paths() {
        let r = resolver();
        for p in ["uploads/images/a.jpg", "uploads/images/nested/b.png"] {
            assert_eq!(r.to_stored_path(&r.to_public_url(p)), p);
        }
    }

    #[test]
    fn base_without_trailing_slash_is_normalized() {
        let r = MediaResolver::new("http://localhost:8000");
        assert_eq!(
            r.to_public_url("uploads/a.jpg"),
            "http://localhost:8000/uploads/a.jpg"
        );
        assert_eq!(r.to_stored_path(&r.to_public_url("uploads/a.jpg")), "uploads/a.jpg");
    }
}
