//! The two reusable screen lifecycles.
//!
//! Every list/detail screen runs a [`FocusFetchController`] against one
//! record collection, and every create/update/delete action runs through a
//! [`MutationSequencer`] that, on success, re-triggers the controller.

mod fetch;
mod mutation;

pub use fetch::{FocusFetchController, ViewState};
pub use mutation::{ConfirmationRequest, MutationOutcome, MutationSequencer};
