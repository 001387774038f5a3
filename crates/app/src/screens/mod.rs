//! Screen controllers: the non-visual half of each screen.
//!
//! Every controller is generic over its backend `B`, navigator `N`, and
//! prompt `P`, holds its fetch controller and mutation sequencers, and
//! exposes a view-state projection for the rendering layer. Controllers
//! borrow their collaborators for the lifetime of the mounted screen.

pub mod auth;
pub mod cart;
pub mod products;
pub mod profile;

pub use auth::{LoginScreen, SignUpScreen};
pub use cart::CartScreen;
pub use products::{ProductDetailScreen, ProductFormScreen, ProductListScreen};
pub use profile::ProfileScreen;
