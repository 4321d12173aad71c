//! Zeitgesteuerter Sequencer
//!
//! Ein Index, der in einem Ring fester Größe weiterläuft. Wird für das
//! Lauflicht (N Slots) und für das Farbrad (256 Slots) verwendet.

use crate::logic::should_advance;

/// Index in `[0, len)`, läuft modulo `len` weiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    index: usize,
    len: usize,
}

impl Ring {
    /// `len` wird auf mindestens 1 angehoben, damit der Index immer gültig ist
    pub const fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: if len == 0 { 1 } else { len },
        }
    }

    /// Ring mit Startindex, `index` wird modulo `len` genommen
    pub const fn at(index: usize, len: usize) -> Self {
        let ring = Self::new(len);
        Self {
            index: index % ring.len,
            len: ring.len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_last(&self) -> bool {
        self.index == self.len - 1
    }

    pub fn advance_by(&mut self, step: usize) -> usize {
        self.index = (self.index + step % self.len) % self.len;
        self.index
    }

    pub fn advance(&mut self) -> usize {
        self.advance_by(1)
    }
}

/// Ring, der nur nach Ablauf eines Intervalls weiterläuft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    ring: Ring,
    interval_ms: u32,
    last_advance_ms: u32,
}

impl Sequencer {
    pub const fn new(slots: usize, interval_ms: u32) -> Self {
        Self {
            ring: Ring::new(slots),
            interval_ms,
            last_advance_ms: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.ring.index()
    }

    pub fn slots(&self) -> usize {
        self.ring.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.ring.is_last()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn last_advance_ms(&self) -> u32 {
        self.last_advance_ms
    }

    /// Startet die Zeitmessung neu, die Position bleibt erhalten
    pub fn restart(&mut self, now: u32) {
        self.last_advance_ms = now;
    }

    pub fn is_due(&self, now: u32) -> bool {
        should_advance(now, self.last_advance_ms, self.interval_ms)
    }

    /// Rückt weiter, falls fällig, und liefert die neue Position
    pub fn poll(&mut self, now: u32) -> Option<usize> {
        if !self.is_due(now) {
            return None;
        }
        self.last_advance_ms = now;
        Some(self.ring.advance())
    }
}

/// Farbrad-Offset 0..=255, läuft pro Schritt um `step` weiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueWheel {
    ring: Ring,
    step: u8,
}

impl HueWheel {
    pub const fn new(step: u8) -> Self {
        Self {
            ring: Ring::new(256),
            step,
        }
    }

    pub const fn with_offset(offset: u8, step: u8) -> Self {
        Self {
            ring: Ring::at(offset as usize, 256),
            step,
        }
    }

    pub fn offset(&self) -> u8 {
        self.ring.index() as u8
    }

    pub fn advance(&mut self) -> u8 {
        self.ring.advance_by(self.step as usize) as u8
    }
}
