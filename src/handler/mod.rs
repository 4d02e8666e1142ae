//! Request handler module
//!
//! Responsible for request routing dispatch and business logic processing:
//! API endpoints under /api, static files everywhere else.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
