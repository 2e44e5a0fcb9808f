// dispatch.rs - Effect dispatch

//! Translation of effect descriptors into mixer backend calls.
//!
//! [`apply_effect`] issues exactly one backend call per recognized
//! descriptor, passing its fields through unchanged. [`apply_effects`]
//! walks a descriptor sequence in order. No state lives here; the
//! descriptor sequence belongs to its owner and the channel tables
//! belong to the backend.

use crate::backend::MixerBackend;
use crate::effects::types::Effect;
use crate::error::MixerResult;

/// Apply one effect descriptor to a channel
///
/// An unrecognized tag is not an error: it is logged and skipped, and
/// the call succeeds. Backend failures propagate unchanged.
pub fn apply_effect(
    backend: &mut dyn MixerBackend,
    channel: i32,
    effect: Effect,
) -> MixerResult<()> {
    match effect {
        Effect::Volume { left, right } => backend.set_panning(channel, left, right),
        Effect::Position { angle, distance } => backend.set_position(channel, angle, distance),
        Effect::ReverseStereo { flip } => backend.set_reverse_stereo(channel, flip),
        Effect::Custom(custom) => backend.register_effect(channel, custom),
        Effect::Unknown { id } => {
            log::warn!("unknown effect {id} on channel {channel}, skipping");
            Ok(())
        }
    }
}

/// Apply a descriptor sequence to a channel, in order
///
/// Every descriptor gets its own dispatch decision; none are skipped,
/// reordered, or deduplicated. Later descriptors may overwrite channel
/// state set by earlier ones. An empty sequence performs zero backend
/// calls.
pub fn apply_effects<I>(backend: &mut dyn MixerBackend, channel: i32, effects: I) -> MixerResult<()>
where
    I: IntoIterator<Item = Effect>,
{
    for effect in effects {
        apply_effect(backend, channel, effect)?;
    }
    Ok(())
}
