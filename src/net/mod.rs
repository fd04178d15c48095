//! Network access to the protected person service.

pub mod api;
