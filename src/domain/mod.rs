// Domain layer: catalog entities, derived view models and ports (interfaces).

pub mod model;
pub mod ports;
