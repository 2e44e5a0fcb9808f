// mod.rs - Mixer backend module

//! Mixer backend interface and implementations.
//!
//! A backend is the native mixer's per-channel configuration surface:
//! panning, spatial position, stereo reversal, and generic effect
//! registration. The effect dispatcher translates descriptors into
//! calls on this interface and nothing else.
//!
//! # Architecture
//!
//! - `MixerBackend` - the capability trait all backends implement
//! - `null` - silent backend for audio-disabled runs
//! - `recording` - call-recording backend for tests and diagnostics
//! - `soft` - in-process software channel-state table
//! - `sdl` - forwarding backend onto SDL2_mixer (feature `sdl-mixer`)

pub mod null;
pub mod recording;
pub mod soft;

#[cfg(feature = "sdl-mixer")]
pub mod sdl;

pub use null::NullBackend;
pub use recording::{BackendCall, RecordingBackend};
pub use soft::{ChannelSnapshot, SoftBackend};

#[cfg(feature = "sdl-mixer")]
pub use sdl::SdlMixerBackend;

use crate::effects::CustomEffect;
use crate::error::MixerResult;

/// Per-channel configuration interface of a native mixer
///
/// Channel indices are the native mixer's own channel-table indices;
/// validating them is the backend's job, not the caller's. Every
/// operation applies to exactly one channel.
pub trait MixerBackend: Send {
    /// Set per-channel left/right gain (0..=255 each)
    fn set_panning(&mut self, channel: i32, left: u8, right: u8) -> MixerResult<()>;

    /// Set per-channel directional attenuation by angle and distance
    fn set_position(&mut self, channel: i32, angle: i16, distance: u8) -> MixerResult<()>;

    /// Set or clear the per-channel stereo-swap flag
    fn set_reverse_stereo(&mut self, channel: i32, flip: bool) -> MixerResult<()>;

    /// Register a custom effect on the channel
    ///
    /// The backend owns the effect from here on and invokes it on every
    /// subsequent audio buffer for the channel until it is removed.
    fn register_effect(&mut self, channel: i32, effect: CustomEffect) -> MixerResult<()>;

    /// Remove every registered effect from the channel
    ///
    /// Each removed effect's completion hook runs exactly once.
    fn unregister_all_effects(&mut self, channel: i32) -> MixerResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_trait_is_object_safe() {
        fn assert_dyn(_backend: &mut dyn MixerBackend) {}
        let mut backend = NullBackend::new();
        assert_dyn(&mut backend);
    }
}
