// Domain layer: request-scoped models and the ports (interfaces) the host provides.

pub mod model;
pub mod ports;
