//! Prometheus remote-write 1.0 payloads: snappy block compression around a
//! protobuf `WriteRequest`.
//!
//! Decoding is a debugging aid only. Nothing decoded here is stored or fed
//! back into the local registry.

pub mod decode;
pub mod proto;
pub mod render;

pub use decode::{decode, DecodeError};
pub use render::render;
