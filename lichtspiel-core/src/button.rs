//! Entprellter Taster
//!
//! Erkennt Tastendrücke als fallende Flanke (Pull-Up, gedrückt = LOW).

use crate::logic::should_advance;
use crate::traits::DigitalInput;
use crate::types::PressEvent;

/// Flankendetektor für einen Active-Low Taster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    level: bool,
    previous: bool,
}

impl ButtonState {
    /// Startzustand: nicht gedrückt (Pull-Up → HIGH)
    pub const fn new() -> Self {
        Self {
            level: true,
            previous: true,
        }
    }

    /// Übernimmt den aktuellen Pegel, liefert ein Event nur bei 1 → 0
    pub fn update(&mut self, level: bool) -> Option<PressEvent> {
        self.previous = self.level;
        self.level = level;
        (self.previous && !self.level).then_some(PressEvent)
    }

    pub fn level(&self) -> bool {
        self.level
    }

    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}

/// Taster mit Flankenerkennung und Sperrzeit
///
/// Der Pegel wird bei jedem Poll übernommen, auch innerhalb der
/// Sperrzeit, damit die Flankenerkennung danach stimmt.
pub struct DebouncedInput<I> {
    pin: I,
    state: ButtonState,
    settle_ms: u32,
    last_press_ms: Option<u32>,
}

impl<I: DigitalInput> DebouncedInput<I> {
    pub fn new(pin: I, settle_ms: u32) -> Self {
        Self {
            pin,
            state: ButtonState::new(),
            settle_ms,
            last_press_ms: None,
        }
    }

    /// Liest den Pin einmal und meldet einen sauberen Tastendruck
    pub fn poll(&mut self, now: u32) -> Option<PressEvent> {
        let level = self.pin.read();
        let event = self.state.update(level)?;

        if let Some(last) = self.last_press_ms
            && !should_advance(now, last, self.settle_ms)
        {
            return None;
        }

        self.last_press_ms = Some(now);
        Some(event)
    }

    pub fn state(&self) -> &ButtonState {
        &self.state
    }
}
