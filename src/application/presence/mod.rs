//! Simulated presence for demo mode

pub mod demo;
pub mod simulator;

pub use demo::DemoMode;
pub use simulator::{PresenceHandle, PresenceSimulator};
