//! Platform abstraction layer
//!
//! Handles the pieces that differ between web portals and native:
//! - Ad SDK detection and mediation ([`ads`])
//! - Timer-backed event debouncing ([`debounce`], WASM only)

pub mod ads;
#[cfg(target_arch = "wasm32")]
pub mod debounce;

pub use ads::{AdBroker, AdPlatform, RewardOutcome};
