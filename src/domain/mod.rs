//! Domain layer
//!
//! Pure data and the ports the backends are written against. Nothing in here
//! touches the network, spawns processes or reads files.

pub mod entities;
pub mod ports;
pub mod value_objects;
