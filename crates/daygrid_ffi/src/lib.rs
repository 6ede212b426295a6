//! FFI surface for the daygrid calendar core.
//! See `api` for the exported function set and its contracts.

pub mod api;
