//! Database Models
//!
//! Plain serde structs persisted as SurrealDB records. Foreign keys
//! are `RecordId` links; read shapes with `Expanded` in the name have
//! those links fetched into embedded records. Wire field names are
//! camelCase.

pub mod address;
pub mod brand;
pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod review;
pub mod wishlist;

pub use address::{Address, AddressCreate, AddressUpdate};
pub use brand::Brand;
pub use cart::{CartItem, CartItemCreate, CartItemExpanded, CartItemUpdate};
pub use category::Category;
pub use order::{
    AddressSnapshot, Order, OrderCreate, OrderExpanded, OrderItem, OrderItemExpanded,
    OrderItemInput, OrderStatus, OrderStatusUpdate, PaymentMode,
};
pub use product::{Product, ProductCreate, ProductExpanded, ProductUpdate};
pub use review::{Review, ReviewCreate, ReviewUpdate};
pub use wishlist::{WishlistItem, WishlistItemCreate, WishlistItemExpanded, WishlistItemUpdate};
