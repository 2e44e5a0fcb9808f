// soft.rs - Software channel-state backend

//! Software mixer channel table.
//!
//! Keeps the per-channel configuration a native mixer would hold:
//! panning pair, spatial position, stereo-swap flag, and the list of
//! registered custom effects. Setters only store state; there is no
//! mixing pipeline behind them. The rendering side of a host program
//! calls [`SoftBackend::run_effects`] with each buffer it produces for
//! a channel.
//!
//! Each channel is guarded by its own lock, so a render thread running
//! effects on one channel does not block control calls on another.

use parking_lot::Mutex;

use crate::backend::MixerBackend;
use crate::config::MixerConfig;
use crate::effects::CustomEffect;
use crate::error::{MixerError, MixerResult};

/// Default panning: full volume on both sides
const PAN_DEFAULT: (u8, u8) = (255, 255);

/// State held for one mixer channel
#[derive(Debug, Default)]
struct ChannelState {
    left: u8,
    right: u8,
    angle: i16,
    distance: u8,
    reverse: bool,
    effects: Vec<CustomEffect>,
}

impl ChannelState {
    fn new() -> Self {
        ChannelState {
            left: PAN_DEFAULT.0,
            right: PAN_DEFAULT.1,
            ..ChannelState::default()
        }
    }
}

/// Read-only copy of one channel's configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub left: u8,
    pub right: u8,
    pub angle: i16,
    pub distance: u8,
    pub reverse: bool,
    pub effect_count: usize,
}

/// In-process software channel table
pub struct SoftBackend {
    config: MixerConfig,
    channels: Vec<Mutex<ChannelState>>,
}

impl SoftBackend {
    /// Create a table with the given channel count and default
    /// frequency/format
    pub fn new(channels: u32) -> MixerResult<Self> {
        Self::with_config(MixerConfig::with_channels(channels))
    }

    /// Create a table from a full configuration
    pub fn with_config(config: MixerConfig) -> MixerResult<Self> {
        config.validate()?;
        let channels = (0..config.channels)
            .map(|_| Mutex::new(ChannelState::new()))
            .collect();
        Ok(SoftBackend { config, channels })
    }

    /// The configuration this table was created with
    pub fn config(&self) -> &MixerConfig {
        &self.config
    }

    /// Number of channels in the table
    pub fn channel_count(&self) -> u32 {
        self.channels.len() as u32
    }

    fn channel(&self, channel: i32) -> MixerResult<&Mutex<ChannelState>> {
        usize::try_from(channel)
            .ok()
            .and_then(|index| self.channels.get(index))
            .ok_or(MixerError::InvalidChannel(channel))
    }

    /// Set the channel's left/right gain
    pub fn set_panning(&self, channel: i32, left: u8, right: u8) -> MixerResult<()> {
        let mut state = self.channel(channel)?.lock();
        state.left = left;
        state.right = right;
        Ok(())
    }

    /// Set the channel's spatial position
    pub fn set_position(&self, channel: i32, angle: i16, distance: u8) -> MixerResult<()> {
        let mut state = self.channel(channel)?.lock();
        state.angle = angle;
        state.distance = distance;
        Ok(())
    }

    /// Set or clear the channel's stereo-swap flag
    pub fn set_reverse_stereo(&self, channel: i32, flip: bool) -> MixerResult<()> {
        self.channel(channel)?.lock().reverse = flip;
        Ok(())
    }

    /// Register a custom effect; it runs on every buffer passed to
    /// [`run_effects`](Self::run_effects) until removed
    pub fn register_effect(&self, channel: i32, effect: CustomEffect) -> MixerResult<()> {
        self.channel(channel)?.lock().effects.push(effect);
        Ok(())
    }

    /// Remove every registered effect, firing completion hooks in
    /// registration order
    pub fn unregister_all_effects(&self, channel: i32) -> MixerResult<()> {
        let effects = std::mem::take(&mut self.channel(channel)?.lock().effects);
        for effect in effects {
            effect.finish(channel);
        }
        Ok(())
    }

    /// Run the channel's registered effects over one buffer, in
    /// registration order
    ///
    /// The channel stays locked while its effects run; other channels
    /// remain available to control calls.
    pub fn run_effects(&self, channel: i32, stream: &mut [u8]) -> MixerResult<()> {
        let mut state = self.channel(channel)?.lock();
        for effect in state.effects.iter_mut() {
            effect.run(channel, stream);
        }
        Ok(())
    }

    /// Current left/right gain for the channel
    pub fn panning(&self, channel: i32) -> MixerResult<(u8, u8)> {
        let state = self.channel(channel)?.lock();
        Ok((state.left, state.right))
    }

    /// Current spatial position for the channel
    pub fn position(&self, channel: i32) -> MixerResult<(i16, u8)> {
        let state = self.channel(channel)?.lock();
        Ok((state.angle, state.distance))
    }

    /// Current stereo-swap flag for the channel
    pub fn reverse_stereo(&self, channel: i32) -> MixerResult<bool> {
        Ok(self.channel(channel)?.lock().reverse)
    }

    /// Number of effects registered on the channel
    pub fn effect_count(&self, channel: i32) -> MixerResult<usize> {
        Ok(self.channel(channel)?.lock().effects.len())
    }

    /// Copy of the channel's full configuration
    pub fn snapshot(&self, channel: i32) -> MixerResult<ChannelSnapshot> {
        let state = self.channel(channel)?.lock();
        Ok(ChannelSnapshot {
            left: state.left,
            right: state.right,
            angle: state.angle,
            distance: state.distance,
            reverse: state.reverse,
            effect_count: state.effects.len(),
        })
    }
}

impl MixerBackend for SoftBackend {
    fn set_panning(&mut self, channel: i32, left: u8, right: u8) -> MixerResult<()> {
        SoftBackend::set_panning(self, channel, left, right)
    }

    fn set_position(&mut self, channel: i32, angle: i16, distance: u8) -> MixerResult<()> {
        SoftBackend::set_position(self, channel, angle, distance)
    }

    fn set_reverse_stereo(&mut self, channel: i32, flip: bool) -> MixerResult<()> {
        SoftBackend::set_reverse_stereo(self, channel, flip)
    }

    fn register_effect(&mut self, channel: i32, effect: CustomEffect) -> MixerResult<()> {
        SoftBackend::register_effect(self, channel, effect)
    }

    fn unregister_all_effects(&mut self, channel: i32) -> MixerResult<()> {
        SoftBackend::unregister_all_effects(self, channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_new_table_defaults() {
        let backend = SoftBackend::new(4).unwrap();
        assert_eq!(backend.channel_count(), 4);
        assert_eq!(backend.panning(0).unwrap(), PAN_DEFAULT);
        assert_eq!(backend.position(0).unwrap(), (0, 0));
        assert!(!backend.reverse_stereo(0).unwrap());
        assert_eq!(backend.effect_count(0).unwrap(), 0);
    }

    #[test]
    fn test_setters_store_state() {
        let backend = SoftBackend::new(2).unwrap();
        backend.set_panning(1, 40, 200).unwrap();
        backend.set_position(1, -45, 128).unwrap();
        backend.set_reverse_stereo(1, true).unwrap();

        assert_eq!(
            backend.snapshot(1).unwrap(),
            ChannelSnapshot {
                left: 40,
                right: 200,
                angle: -45,
                distance: 128,
                reverse: true,
                effect_count: 0,
            }
        );
        // Channel 0 untouched
        assert_eq!(backend.panning(0).unwrap(), PAN_DEFAULT);
    }

    #[test]
    fn test_invalid_channel_is_rejected() {
        let backend = SoftBackend::new(2).unwrap();
        assert_eq!(
            backend.set_panning(2, 0, 0),
            Err(MixerError::InvalidChannel(2))
        );
        assert_eq!(
            backend.set_panning(-1, 0, 0),
            Err(MixerError::InvalidChannel(-1))
        );
        assert!(backend.panning(7).is_err());
    }

    #[test]
    fn test_run_effects_in_registration_order() {
        let backend = SoftBackend::new(1).unwrap();
        backend
            .register_effect(0, CustomEffect::new(|_, stream| stream.fill(1)))
            .unwrap();
        backend
            .register_effect(
                0,
                CustomEffect::new(|_, stream| {
                    for byte in stream.iter_mut() {
                        *byte *= 3;
                    }
                }),
            )
            .unwrap();

        let mut stream = [0u8; 4];
        backend.run_effects(0, &mut stream).unwrap();
        // fill-then-multiply, not multiply-then-fill
        assert_eq!(stream, [3, 3, 3, 3]);
    }

    #[test]
    fn test_unregister_fires_completion_hooks() {
        let finished = Arc::new(AtomicU32::new(0));
        let backend = SoftBackend::new(1).unwrap();

        for _ in 0..3 {
            let finished_in = Arc::clone(&finished);
            backend
                .register_effect(
                    0,
                    CustomEffect::new(|_, _| {}).with_done(move |_| {
                        finished_in.fetch_add(1, Ordering::SeqCst);
                    }),
                )
                .unwrap();
        }

        backend.unregister_all_effects(0).unwrap();
        assert_eq!(finished.load(Ordering::SeqCst), 3);
        assert_eq!(backend.effect_count(0).unwrap(), 0);
    }

    #[test]
    fn test_control_calls_during_render() {
        // A render thread hammering channel 0 must not block control
        // of channel 1.
        let backend = Arc::new(SoftBackend::new(2).unwrap());
        backend
            .register_effect(0, CustomEffect::new(|_, stream| stream.fill(7)))
            .unwrap();

        let render = Arc::clone(&backend);
        let handle = std::thread::spawn(move || {
            let mut stream = [0u8; 64];
            for _ in 0..1000 {
                render.run_effects(0, &mut stream).unwrap();
            }
        });

        for i in 0..1000u32 {
            backend.set_panning(1, (i % 256) as u8, 255).unwrap();
        }
        handle.join().unwrap();
        assert_eq!(backend.panning(1).unwrap().1, 255);
    }
}
