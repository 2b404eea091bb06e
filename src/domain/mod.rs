// Domain layer: the association record, the resource schema and the ports the lifecycle code talks to.

pub mod model;
pub mod ports;
pub mod schema;
