// Domain layer: scraped entities and the ports the pipeline talks through.

pub mod model;
pub mod ports;
