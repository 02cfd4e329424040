//! # Core Interaction Logic
//!
//! Everything navkit decides, independent of any UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No draw.  │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`navigation`]: Menu state machine, elevation and staggered reveal
//! - [`control`]: Interactive control (activation, ripple, motion profile)
//! - [`scroll`] / [`scroll_lock`]: Page offset, threshold tracking, scroll lock
//! - [`motion`] / [`animation`]: Reduced-motion preference, timings, easing
//! - [`style`]: Variant and size mapping onto theme tokens
//! - [`router`]: Path history
//! - [`config`]: Layered configuration

pub mod action;
pub mod animation;
pub mod config;
pub mod control;
pub mod motion;
pub mod navigation;
pub mod router;
pub mod scroll;
pub mod scroll_lock;
pub mod state;
pub mod style;
