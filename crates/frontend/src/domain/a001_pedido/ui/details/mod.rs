//! Order details dialog
//!
//! MVVM split:
//! - state.rs: plain state, edit rules and the render tree
//! - view_model.rs: signals and commands (load, edit, save, pay, delete)
//! - view.rs: Leptos components

mod state;
mod view;
mod view_model;

pub use state::{DetailsView, FieldError, ItemField, ItemRowView};
pub use view::OrderDetailsDialog;
pub use view_model::OrderDetailsVm;
