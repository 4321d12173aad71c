//! Lichtspiel Core - Platform-agnostic Game Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits für Taster, LEDs, Display, Buzzer, Speicher und Uhr
//! sowie die komplette Spiel-Logik dahinter.

#![no_std]

pub mod app;
pub mod button;
pub mod game;
pub mod logic;
pub mod presentation;
#[cfg(feature = "serde")]
pub mod record;
pub mod score;
pub mod sequencer;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use app::GameContext;
pub use button::{ButtonState, DebouncedInput};
pub use game::Game;
pub use logic::{chase_segment, rainbow_pixel, should_advance, wheel};
pub use presentation::{Channels, PresentationSink, Presenter, ScrollText};
#[cfg(feature = "serde")]
pub use record::FlashRecordStore;
pub use score::{LoadError, SCORE_KEY, ScoreStore};
pub use sequencer::{HueWheel, Ring, Sequencer};
pub use traits::{
    AudioPulse, Clock, DigitalInput, DigitalOutput, Display, HardwareFault, KeyValueStore,
    PixelStrip, RgbIndicator, StoreError,
};
pub use types::{
    DisplayLayout, GameConfig, PressEvent, RunState, Scene, Score, TickReport, Tone, Verdict,
};
