//! Web half of the bridge: drives the triggering control, asks the native side for a credential,
//! and reconciles the reply with the server's callback endpoint.

pub mod config;
pub mod controller;
pub mod page;

pub use config::*;
pub use controller::*;
pub use page::*;
