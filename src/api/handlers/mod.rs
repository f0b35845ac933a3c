//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod redirections;

pub use health::health_handler;
pub use redirect::{missing_id_handler, redirect_handler};
pub use redirections::{
    create_redirection_handler, delete_redirection_handler, get_redirection_handler,
    list_redirections_handler, update_redirection_handler,
};
