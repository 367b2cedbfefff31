// Domain layer: dough inputs, derived recipe and the ports the engine talks to.

pub mod model;
pub mod ports;
