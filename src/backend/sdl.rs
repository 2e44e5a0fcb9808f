// sdl.rs - SDL2_mixer forwarding backend

//! Forwarding backend onto the real SDL2_mixer library.
//!
//! Panning, position, and stereo reversal go through the safe
//! `sdl2::mixer::Channel` wrappers. Generic effect registration has no
//! safe wrapper, so `register_effect` drops to
//! `sdl2::sys::mixer::Mix_RegisterEffect` with an
//! `extern "C"` trampoline pair: the boxed effect crosses the boundary
//! as the `udata` pointer and is reclaimed exactly once in the done
//! trampoline, which SDL_mixer fires when the effect is removed or the
//! channel finishes.
//!
//! The caller is responsible for SDL init (`sdl2::init` plus the audio
//! subsystem); [`SdlMixerBackend::open`] only opens the mixer device
//! and allocates channels.

use std::os::raw::{c_int, c_void};

use crate::backend::MixerBackend;
use crate::config::{MixerConfig, MixerFormat};
use crate::effects::CustomEffect;
use crate::error::{MixerError, MixerResult};

/// Decode chunk size handed to Mix_OpenAudio, in bytes
const CHUNK_SIZE: i32 = 1024;

fn map_format(format: MixerFormat) -> sdl2::mixer::AudioFormat {
    match format.bytes_per_channel() {
        1 => sdl2::mixer::AUDIO_S8,
        _ => sdl2::mixer::AUDIO_S16LSB,
    }
}

/// Effect state handed across the C boundary as `udata`
struct EffectSlot {
    effect: Option<CustomEffect>,
}

unsafe extern "C" fn effect_trampoline(
    chan: c_int,
    stream: *mut c_void,
    len: c_int,
    udata: *mut c_void,
) {
    if stream.is_null() || len <= 0 || udata.is_null() {
        return;
    }
    let slot = &mut *(udata as *mut EffectSlot);
    let bytes = std::slice::from_raw_parts_mut(stream as *mut u8, len as usize);
    if let Some(effect) = slot.effect.as_mut() {
        effect.run(chan, bytes);
    }
}

unsafe extern "C" fn effect_done_trampoline(chan: c_int, udata: *mut c_void) {
    if udata.is_null() {
        return;
    }
    // Reclaim the slot; this is the single release point for the boxed
    // effect once registration has succeeded.
    let mut slot = Box::from_raw(udata as *mut EffectSlot);
    if let Some(effect) = slot.effect.take() {
        effect.finish(chan);
    }
}

/// Backend that forwards every operation to SDL2_mixer
pub struct SdlMixerBackend {
    config: MixerConfig,
}

impl SdlMixerBackend {
    /// Open the mixer device and allocate channels per the configuration
    pub fn open(config: MixerConfig) -> MixerResult<Self> {
        config.validate()?;
        sdl2::mixer::open_audio(
            config.frequency as i32,
            map_format(config.format),
            config.format.channels() as i32,
            CHUNK_SIZE,
        )
        .map_err(MixerError::Driver)?;
        sdl2::mixer::allocate_channels(config.channels as i32);
        log::debug!(
            "sdl mixer opened: {} Hz, {:?}, {} channels",
            config.frequency,
            config.format,
            config.channels
        );
        Ok(SdlMixerBackend { config })
    }

    /// The configuration the device was opened with
    pub fn config(&self) -> &MixerConfig {
        &self.config
    }
}

impl Drop for SdlMixerBackend {
    fn drop(&mut self) {
        sdl2::mixer::close_audio();
    }
}

impl MixerBackend for SdlMixerBackend {
    fn set_panning(&mut self, channel: i32, left: u8, right: u8) -> MixerResult<()> {
        sdl2::mixer::Channel(channel)
            .set_panning(left, right)
            .map_err(MixerError::Driver)
    }

    fn set_position(&mut self, channel: i32, angle: i16, distance: u8) -> MixerResult<()> {
        sdl2::mixer::Channel(channel)
            .set_position(angle, distance)
            .map_err(MixerError::Driver)
    }

    fn set_reverse_stereo(&mut self, channel: i32, flip: bool) -> MixerResult<()> {
        sdl2::mixer::Channel(channel)
            .set_reverse_stereo(flip)
            .map_err(MixerError::Driver)
    }

    fn register_effect(&mut self, channel: i32, effect: CustomEffect) -> MixerResult<()> {
        let slot = Box::into_raw(Box::new(EffectSlot {
            effect: Some(effect),
        }));

        let rc = unsafe {
            sdl2::sys::mixer::Mix_RegisterEffect(
                channel,
                Some(effect_trampoline),
                Some(effect_done_trampoline),
                slot as *mut c_void,
            )
        };

        if rc == 0 {
            // Registration never happened; the done trampoline will not
            // fire, so reclaim the slot here.
            let mut slot = unsafe { Box::from_raw(slot) };
            if let Some(effect) = slot.effect.take() {
                effect.finish(channel);
            }
            return Err(MixerError::Driver(sdl2::get_error()));
        }
        Ok(())
    }

    fn unregister_all_effects(&mut self, channel: i32) -> MixerResult<()> {
        sdl2::mixer::Channel(channel)
            .unregister_all_effects()
            .map_err(MixerError::Driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mapping() {
        assert_eq!(map_format(MixerFormat::Mono8), sdl2::mixer::AUDIO_S8);
        assert_eq!(map_format(MixerFormat::Stereo8), sdl2::mixer::AUDIO_S8);
        assert_eq!(map_format(MixerFormat::Mono16), sdl2::mixer::AUDIO_S16LSB);
        assert_eq!(map_format(MixerFormat::Stereo16), sdl2::mixer::AUDIO_S16LSB);
    }
}
