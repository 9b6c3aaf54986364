//! Identifiers for the builtin environments

/// Classic control environments
pub mod classic_control {
    /// Cart-pole balancing
    pub const CART_POLE: &str = "CartPole-v1";
    /// Mountain-car momentum building
    pub const MOUNTAIN_CAR: &str = "MountainCar-v0";
}

/// Toy-text environments
pub mod toy_text {
    /// Frozen-lake grid walk
    pub const FROZEN_LAKE: &str = "FrozenLake-v1";
}

/// Every builtin environment identifier
#[must_use]
pub fn all() -> Vec<&'static str> {
    vec![
        classic_control::CART_POLE,
        classic_control::MOUNTAIN_CAR,
        toy_text::FROZEN_LAKE,
    ]
}
