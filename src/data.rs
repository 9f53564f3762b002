pub mod base_url;
pub mod simple_message;
