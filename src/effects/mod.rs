// mod.rs - Channel effects module

//! Per-channel effect descriptors and their dispatch.
//!
//! Callers describe what should happen to a mixer channel with
//! [`Effect`] descriptors; [`apply_effect`]/[`apply_effects`] translate
//! them into calls on a [`MixerBackend`](crate::backend::MixerBackend),
//! and [`EffectQueue`] owns the descriptors while they wait.
//!
//! # Architecture
//!
//! - `types` - descriptor sum type, tag enumeration, custom callbacks
//! - `dispatch` - descriptor-to-backend-call translation
//! - `queue` - per-channel pending-descriptor ownership

pub mod dispatch;
pub mod queue;
pub mod types;

pub use dispatch::{apply_effect, apply_effects};
pub use queue::EffectQueue;
pub use types::{CustomEffect, Effect, EffectDoneFn, EffectFn, EffectId, PAN_MAX};
