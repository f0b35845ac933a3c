//! Business logic services for the application layer.

pub mod redirect_resolver;
pub mod registry;

pub use redirect_resolver::RedirectResolver;
pub use registry::Registry;
