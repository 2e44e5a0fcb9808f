//! Null (silent) mixer backend.
//!
//! Accepts every configuration call without touching any audio state.
//! Used when audio is disabled but the rest of the program still drives
//! the effects API with normal timing.

use crate::backend::MixerBackend;
use crate::effects::CustomEffect;
use crate::error::MixerResult;

/// Backend that accepts everything and does nothing
///
/// A custom effect registered here will never see a buffer, so its
/// completion hook fires immediately at registration.
#[derive(Debug, Default)]
pub struct NullBackend {
    _private: (),
}

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        NullBackend::default()
    }
}

impl MixerBackend for NullBackend {
    fn set_panning(&mut self, _channel: i32, _left: u8, _right: u8) -> MixerResult<()> {
        Ok(())
    }

    fn set_position(&mut self, _channel: i32, _angle: i16, _distance: u8) -> MixerResult<()> {
        Ok(())
    }

    fn set_reverse_stereo(&mut self, _channel: i32, _flip: bool) -> MixerResult<()> {
        Ok(())
    }

    fn register_effect(&mut self, channel: i32, effect: CustomEffect) -> MixerResult<()> {
        log::debug!("null backend: discarding effect registration on channel {channel}");
        effect.finish(channel);
        Ok(())
    }

    fn unregister_all_effects(&mut self, _channel: i32) -> MixerResult<()> {
        Ok(())
    }
}
