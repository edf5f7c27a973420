//! ports - abstract trait layer
//!
//! Interfaces the resolution pipeline consumes, kept free of any concrete
//! store client.

mod memory;
mod secret_store;

pub use memory::*;
pub use secret_store::*;
