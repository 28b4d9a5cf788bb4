// Domain layer: value types, wire types and ports. No transport or runtime dependencies.

pub mod model;
pub mod ports;
