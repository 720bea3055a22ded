//! The records passed around by the conversation core.
//!
//! `Message` is both the in-memory log entry and the persisted form; the wire
//! formats for requests and responses live with the client, which maps to and
//! from these structs at the protocol boundary.

pub mod chart;
pub mod message;
