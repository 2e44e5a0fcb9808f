// recording.rs - Call-recording mixer backend

//! Call-recording mixer backend.
//!
//! Records every configuration call in order instead of touching real
//! audio state. This is the observation point for dispatch behavior:
//! tests assert on the exact call sequence, and registered custom
//! effects are retained so they can be driven by hand.

use crate::backend::MixerBackend;
use crate::effects::CustomEffect;
use crate::error::MixerResult;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    SetPanning { channel: i32, left: u8, right: u8 },
    SetPosition { channel: i32, angle: i16, distance: u8 },
    SetReverseStereo { channel: i32, flip: bool },
    RegisterEffect { channel: i32 },
    UnregisterAllEffects { channel: i32 },
}

/// Backend that records calls instead of performing them
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    effects: Vec<(i32, CustomEffect)>,
}

impl RecordingBackend {
    /// Create an empty recording backend
    pub fn new() -> Self {
        RecordingBackend::default()
    }

    /// All calls recorded so far, in order
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Drain and return the recorded calls
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of effects currently registered on a channel
    pub fn registered(&self, channel: i32) -> usize {
        self.effects.iter().filter(|(c, _)| *c == channel).count()
    }

    /// Run every effect registered on the channel over a buffer, in
    /// registration order
    pub fn run_registered(&mut self, channel: i32, stream: &mut [u8]) {
        for (c, effect) in self.effects.iter_mut() {
            if *c == channel {
                effect.run(channel, stream);
            }
        }
    }
}

impl MixerBackend for RecordingBackend {
    fn set_panning(&mut self, channel: i32, left: u8, right: u8) -> MixerResult<()> {
        self.calls.push(BackendCall::SetPanning {
            channel,
            left,
            right,
        });
        Ok(())
    }

    fn set_position(&mut self, channel: i32, angle: i16, distance: u8) -> MixerResult<()> {
        self.calls.push(BackendCall::SetPosition {
            channel,
            angle,
            distance,
        });
        Ok(())
    }

    fn set_reverse_stereo(&mut self, channel: i32, flip: bool) -> MixerResult<()> {
        self.calls
            .push(BackendCall::SetReverseStereo { channel, flip });
        Ok(())
    }

    fn register_effect(&mut self, channel: i32, effect: CustomEffect) -> MixerResult<()> {
        self.calls.push(BackendCall::RegisterEffect { channel });
        self.effects.push((channel, effect));
        Ok(())
    }

    fn unregister_all_effects(&mut self, channel: i32) -> MixerResult<()> {
        self.calls
            .push(BackendCall::UnregisterAllEffects { channel });
        let mut kept = Vec::with_capacity(self.effects.len());
        for (c, effect) in self.effects.drain(..) {
            if c == channel {
                effect.finish(channel);
            } else {
                kept.push((c, effect));
            }
        }
        self.effects = kept;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut backend = RecordingBackend::new();
        backend.set_panning(1, 10, 20).unwrap();
        backend.set_reverse_stereo(1, true).unwrap();
        backend.set_position(2, -90, 5).unwrap();

        assert_eq!(
            backend.calls(),
            &[
                BackendCall::SetPanning {
                    channel: 1,
                    left: 10,
                    right: 20
                },
                BackendCall::SetReverseStereo {
                    channel: 1,
                    flip: true
                },
                BackendCall::SetPosition {
                    channel: 2,
                    angle: -90,
                    distance: 5
                },
            ]
        );
    }

    #[test]
    fn test_retains_and_runs_registered_effects() {
        let mut backend = RecordingBackend::new();
        backend
            .register_effect(4, CustomEffect::new(|_, stream| stream.fill(0xAB)))
            .unwrap();
        assert_eq!(backend.registered(4), 1);
        assert_eq!(backend.registered(5), 0);

        let mut stream = [0u8; 3];
        backend.run_registered(4, &mut stream);
        assert_eq!(stream, [0xAB, 0xAB, 0xAB]);
    }

    #[test]
    fn test_unregister_finishes_only_that_channel() {
        let mut backend = RecordingBackend::new();
        backend
            .register_effect(1, CustomEffect::new(|_, _| {}))
            .unwrap();
        backend
            .register_effect(2, CustomEffect::new(|_, _| {}))
            .unwrap();

        backend.unregister_all_effects(1).unwrap();
        assert_eq!(backend.registered(1), 0);
        assert_eq!(backend.registered(2), 1);
    }

    #[test]
    fn test_take_calls_drains() {
        let mut backend = RecordingBackend::new();
        backend.set_panning(0, 1, 2).unwrap();
        assert_eq!(backend.take_calls().len(), 1);
        assert!(backend.calls().is_empty());
    }
}
