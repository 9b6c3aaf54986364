//! Builtin simulator backends for gymkit
//!
//! This crate provides concrete simulators satisfying the
//! [`gymkit_core::Simulator`] contract:
//! - Toy-text environments (frozen lake, with an exact transition model)
//! - Classic control environments (cart-pole, mountain-car)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classic;
pub mod names;
pub mod toy_text;

// Re-export environments
pub use classic::{CartPole, CartPoleConfig, MountainCar, MountainCarConfig};
pub use toy_text::FrozenLake;

use gymkit_core::Registry;

/// Register every builtin simulator into a registry
pub fn install(registry: &mut Registry) {
    registry.register(names::toy_text::FROZEN_LAKE, |config| {
        let slippery = config
            .params
            .get("slippery")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true);
        Ok(Box::new(FrozenLake::with_map(&toy_text::DEFAULT_MAP, slippery)))
    });
    registry.register(names::classic_control::CART_POLE, |_config| {
        Ok(Box::new(CartPole::new()))
    });
    registry.register(names::classic_control::MOUNTAIN_CAR, |_config| {
        Ok(Box::new(MountainCar::new()))
    });
}

/// A fresh registry with every builtin simulator installed
#[must_use]
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    install(&mut registry);
    registry
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{default_registry, names, CartPole, FrozenLake, MountainCar};
    pub use gymkit_core::prelude::*;
}
