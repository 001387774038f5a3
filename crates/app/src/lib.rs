//! ComprasOnline - catalog/cart client core.
//!
//! This crate implements the non-visual core of the ComprasOnline client:
//!
//! - [`session`] - the process-scoped session store and the session gate
//!   that decides which navigation root is mounted
//! - [`lifecycle`] - the fetch-on-focus controller and the mutation
//!   sequencer every CRUD screen is built from
//! - [`screens`] - the auth, product, cart, and profile screen controllers
//! - [`supabase`] - the remote record store client (GoTrue auth + PostgREST
//!   collections)
//!
//! Rendering, gestures, and widget layout are external collaborators: each
//! screen controller exposes a deterministic view-state projection, and the
//! navigation stack and alert prompts are consumed through the traits in
//! [`navigation`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod session;
pub mod state;
pub mod supabase;

#[cfg(test)]
pub(crate) mod testing;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;
