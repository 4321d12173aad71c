//! Spiel-Zustandsautomat
//!
//! Ein Tastendruck startet bzw. stoppt das Lauflicht. Bleibt es auf dem
//! letzten Slot stehen, ist das Spiel gewonnen.

use crate::sequencer::Sequencer;
use crate::types::{RunState, Verdict};

/// Zustand des Lauflicht-Spiels (ohne Hardware, ohne Score)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    run_state: RunState,
    chase: Sequencer,
    win_recorded: bool,
    flicker_count: u32,
}

impl Game {
    pub const fn new(slots: usize, dwell_ms: u32) -> Self {
        Self {
            run_state: RunState::Stopped,
            chase: Sequencer::new(slots, dwell_ms),
            win_recorded: false,
            flicker_count: 0,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn position(&self) -> usize {
        self.chase.position()
    }

    pub fn win_recorded(&self) -> bool {
        self.win_recorded
    }

    pub fn flicker_count(&self) -> u32 {
        self.flicker_count
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.chase
    }

    /// Reaktion auf einen Tastendruck, liefert den neuen Zustand
    ///
    /// Beim Start beginnt die Verweilzeit ab `now` und ein neuer Sieg
    /// darf wieder gezählt werden.
    pub fn on_press(&mut self, now: u32) -> RunState {
        self.run_state = self.run_state.toggled();
        if self.is_running() {
            self.win_recorded = false;
            self.chase.restart(now);
        }
        self.run_state
    }

    /// Verweilzeit des aktuellen Slots beginnt neu ab `now`
    pub fn restart_dwell(&mut self, now: u32) {
        self.chase.restart(now);
    }

    /// Ist die Verweilzeit des aktuellen Slots abgelaufen?
    pub fn dwell_elapsed(&self, now: u32) -> bool {
        self.chase.is_due(now)
    }

    /// Lauflicht einen Slot weiter, nur im Zustand `Running`
    pub fn advance(&mut self, now: u32) -> Option<usize> {
        if !self.is_running() {
            return None;
        }
        let left_terminal = self.chase.is_terminal();
        let position = self.chase.poll(now)?;
        // Latch gilt nur solange die Position auf dem letzten Slot steht
        if left_terminal {
            self.win_recorded = false;
        }
        self.flicker_count = self.flicker_count.wrapping_add(1);
        Some(position)
    }

    /// Auswertung im angehalten Zustand, `None` solange das Spiel läuft
    ///
    /// `Won { first: true }` kommt genau einmal pro Aufenthalt auf dem
    /// letzten Slot; nur dann darf der Score erhöht werden.
    pub fn evaluate(&mut self) -> Option<Verdict> {
        if self.is_running() {
            return None;
        }
        if self.chase.is_terminal() {
            let first = !self.win_recorded;
            self.win_recorded = true;
            Some(Verdict::Won { first })
        } else {
            self.win_recorded = false;
            Some(Verdict::Lost)
        }
    }
}
