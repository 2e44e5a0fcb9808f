// queue.rs - Pending-effect queue

//! Ownership of pending per-channel effect sequences.
//!
//! Callers request effects on a channel faster than the mixer should
//! be reconfigured (typically once per frame or per command batch), so
//! requests accumulate here and are dispatched together. The queue is
//! the single owner of every descriptor between creation and dispatch:
//! a flush consumes the channel's sequence, and a cleared descriptor
//! that carries a completion hook still gets it fired.

use std::collections::HashMap;

use crate::backend::MixerBackend;
use crate::effects::dispatch::apply_effect;
use crate::effects::types::Effect;
use crate::error::MixerResult;

/// Pending effect descriptors, ordered per channel
#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: HashMap<i32, Vec<Effect>>,
}

impl EffectQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        EffectQueue::default()
    }

    /// Append a descriptor to a channel's pending sequence
    pub fn push(&mut self, channel: i32, effect: Effect) {
        self.pending.entry(channel).or_default().push(effect);
    }

    /// Number of descriptors pending for a channel
    pub fn pending(&self, channel: i32) -> usize {
        self.pending.get(&channel).map_or(0, Vec::len)
    }

    /// Whether no channel has pending descriptors
    pub fn is_empty(&self) -> bool {
        self.pending.values().all(Vec::is_empty)
    }

    /// Apply and consume a channel's pending sequence, in order
    ///
    /// Returns the number of descriptors dispatched. If the backend
    /// fails mid-sequence the error propagates and the not-yet-applied
    /// remainder is dropped with a diagnostic; descriptors are
    /// single-use and a half-applied sequence is not retried.
    pub fn flush(&mut self, backend: &mut dyn MixerBackend, channel: i32) -> MixerResult<usize> {
        let Some(effects) = self.pending.remove(&channel) else {
            return Ok(0);
        };

        let total = effects.len();
        let mut applied = 0;
        for effect in effects {
            if let Err(err) = apply_effect(backend, channel, effect) {
                log::warn!(
                    "effect flush failed on channel {channel} after {applied} of {total}: \
                     dropping the rest"
                );
                return Err(err);
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Flush every channel with pending descriptors
    ///
    /// Returns the total number dispatched. Channels flush in ascending
    /// index order so repeated runs behave the same way.
    pub fn flush_all(&mut self, backend: &mut dyn MixerBackend) -> MixerResult<usize> {
        let mut channels: Vec<i32> = self.pending.keys().copied().collect();
        channels.sort_unstable();

        let mut applied = 0;
        for channel in channels {
            applied += self.flush(backend, channel)?;
        }
        Ok(applied)
    }

    /// Discard a channel's pending sequence without applying it
    ///
    /// Custom descriptors have their completion hooks fired, since they
    /// will never reach a backend. Returns the number discarded.
    pub fn clear(&mut self, channel: i32) -> usize {
        let Some(effects) = self.pending.remove(&channel) else {
            return 0;
        };
        let count = effects.len();
        for effect in effects {
            if let Effect::Custom(custom) = effect {
                custom.finish(channel);
            }
        }
        count
    }
}
