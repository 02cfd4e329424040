//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, mpsc};
use std::time::Instant;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::motion::{MotionSettings, SharedMotion};
use crate::core::state::App;

/// A motion preference pinned to `reduced`, ignoring the environment.
pub fn fixed_motion(reduced: bool) -> SharedMotion {
    Arc::new(MotionSettings::forced(reduced))
}

/// Creates a test App with full motion and default navigation.
///
/// The receiver collects actions sent by control callbacks.
pub fn test_app() -> (App, mpsc::Receiver<Action>) {
    let (tx, rx) = mpsc::channel();
    let config = ResolvedConfig {
        reduced_motion: Some(false),
        ..Default::default()
    };
    (App::from_config(&config, tx, Instant::now()), rx)
}
