//! Exchange data, one slice per backend resource.
//!
//! A slice keeps its validated types in `mod.rs`, the JSON shapes the backend
//! sends in `wire.rs`, and the checked conversion between them in
//! `convert.rs`. The order book also has a `state.rs` snapshot with derived
//! prices. Nothing here performs I/O.

pub mod market;
pub mod order;
pub mod orderbook;
pub mod position;
pub mod transaction;
