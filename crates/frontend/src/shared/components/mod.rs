pub mod error_display;
pub mod page_header;

pub use error_display::ErrorDisplay;
pub use page_header::PageHeader;
