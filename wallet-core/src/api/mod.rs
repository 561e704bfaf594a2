// wallet-core/src/api/mod.rs

//! Flat facade for bindings (FFI / server handlers).

#[allow(clippy::module_inception)]
pub mod api;

pub use api::*;
