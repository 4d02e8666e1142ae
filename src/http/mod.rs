//! HTTP protocol layer.
//!
//! Protocol-level helpers shared by static file serving and the request
//! router, decoupled from any particular route.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;
