// Adapters layer: concrete implementations for clock, ids, and the HTTP transport.

pub mod client;
pub mod clock;
pub mod http;
pub mod ids;
pub mod rpc;
