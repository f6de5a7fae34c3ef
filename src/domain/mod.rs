// Domain layer: request/result models and the ports the handler talks through.

pub mod model;
pub mod ports;
