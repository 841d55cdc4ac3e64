pub mod admin_handler;
pub mod api_handler;
pub mod page_handler;
