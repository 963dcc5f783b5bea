//! Native half of the bridge: routes `authorize` to the OS identity provider and replies once.

pub mod handler;
pub mod provider;

pub use handler::*;
pub use provider::*;
