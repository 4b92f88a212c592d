// Domain layer: request/response models and the ports the runner is generic over.

pub mod model;
pub mod ports;
