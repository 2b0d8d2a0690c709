mod mount;
pub mod state;
mod view;

pub use mount::FormMount;
pub use view::OrderItemsForm;
