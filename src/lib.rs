// lib.rs - chanfx crate root

//! Per-channel audio effect dispatch for SDL_mixer-style backends.
//!
//! A mixer plays sounds on numbered channels; callers shape what comes
//! out of a channel with effect descriptors: a panning pair, a spatial
//! position, a stereo-swap flag, or a custom buffer callback. This
//! crate models those descriptors as a sum type, queues them per
//! channel, and dispatches each one into exactly one call on a mixer
//! backend.
//!
//! # Architecture
//!
//! - `effects` - descriptor types, dispatch, and pending-queue ownership
//! - `backend` - the mixer capability trait and its implementations
//! - `config` - output format and mixer configuration
//! - `error` - crate error taxonomy
//!
//! The real SDL2_mixer backend is behind the `sdl-mixer` feature; the
//! default build carries the software, null, and recording backends and
//! needs no native libraries.
//!
//! # Example
//!
//! ```rust
//! use chanfx::{apply_effects, Effect, SoftBackend};
//!
//! let mut mixer = SoftBackend::new(8).unwrap();
//! let sequence = vec![Effect::volume(255, 128), Effect::reverse_stereo(true)];
//! apply_effects(&mut mixer, 3, sequence).unwrap();
//!
//! assert_eq!(mixer.panning(3).unwrap(), (255, 128));
//! assert!(mixer.reverse_stereo(3).unwrap());
//! ```

pub mod backend;
pub mod config;
pub mod effects;
pub mod error;

pub use backend::{BackendCall, MixerBackend, NullBackend, RecordingBackend, SoftBackend};
pub use config::{MixerConfig, MixerFormat, MIX_CHANNELS};
pub use effects::{apply_effect, apply_effects, CustomEffect, Effect, EffectId, EffectQueue};
pub use error::{MixerError, MixerResult};

#[cfg(feature = "sdl-mixer")]
pub use backend::SdlMixerBackend;
