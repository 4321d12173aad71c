//! Core Types für das Lichtspiel
//!
//! Datenstrukturen ohne Hardware-Dependencies

use crate::traits::{HardwareFault, StoreError};

/// Anzahl der Siege (persistiert unter dem Key `"wins"`)
pub type Score = u32;

/// Ein erkannter Tastendruck (fallende Flanke 1 → 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent;

/// Lauf-Zustand des Spiels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Stopped => RunState::Running,
            RunState::Running => RunState::Stopped,
        }
    }
}

/// Ergebnis eines angehaltenen Spiels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Gestoppt auf dem letzten Slot. `first` ist nur beim ersten
    /// Tick dieses Aufenthalts gesetzt.
    Won { first: bool },
    Lost,
}

/// Was die Ausgabe-Kanäle darstellen sollen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scene {
    /// Spiel wurde gerade gestartet: Strip auf Grundfarbe
    Started,
    /// Lauflicht aktiv, aktueller Slot leuchtet
    Running { position: usize },
    /// Ende der Verweilzeit: alle Slot-LEDs aus
    Blank,
    Won { position: usize },
    Lost { position: usize },
    ScoreReset,
    /// Läuft in jedem Tick: RGB-LED Farbrad weiterdrehen
    Ambient,
}

/// Ton für den Buzzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub duration_ms: u32,
    pub frequency_hz: u32,
}

/// Spiel-Parameter
///
/// Defaults: drei Durchläufe pro Sekunde, 200 ms Entprellung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Volle Lauflicht-Durchläufe pro Sekunde
    pub flickers_per_second: u32,
    /// Schlaf-Quantum während der Verweilzeit
    pub check_interval_ms: u32,
    /// Schlaf am Ende eines angehaltenen Ticks
    pub idle_tick_ms: u32,
    /// Beruhigungszeit nach einem Tastendruck
    pub debounce_ms: u32,
    /// Anzeigedauer der "Score Reset!" Bestätigung
    pub reset_confirm_ms: u32,
    /// Farbrad-Schritt des Strips pro Sieg-Tick
    pub strip_hue_step: u8,
    /// Farbrad-Schritt der RGB-LED pro Tick
    pub indicator_hue_step: u8,
    pub win_tone: Tone,
    /// Pixel pro Scroll-Schritt der Laufschrift
    pub scroll_step: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flickers_per_second: 3,
            check_interval_ms: 10,
            idle_tick_ms: 50,
            debounce_ms: 200,
            reset_confirm_ms: 500,
            strip_hue_step: 50,
            indicator_hue_step: 3,
            win_tone: Tone {
                duration_ms: 500,
                frequency_hz: 2000,
            },
            scroll_step: 2,
        }
    }
}

impl GameConfig {
    /// Verweilzeit pro Slot: `1 / (rate * slots)` Sekunden
    pub fn dwell_ms(&self, slots: usize) -> u32 {
        let per_second = self.flickers_per_second.saturating_mul(slots as u32);
        if per_second == 0 {
            0
        } else {
            1000 / per_second
        }
    }
}

/// Display-Geometrie für Text-Positionen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLayout {
    pub width: i32,
    pub height: i32,
    /// Breite eines Zeichens der verwendeten Schrift
    pub glyph_width: i32,
    /// y der Statuszeile (Slot-Nummer und Score)
    pub status_y: i32,
    /// Untere Grenze der Laufschrift, darf die Statuszeile nicht überlappen
    pub scroll_limit: i32,
}

impl DisplayLayout {
    /// 128x64 Panel, wie beim SSD1306
    pub const fn oled_128x64(glyph_width: i32) -> Self {
        Self {
            width: 128,
            height: 64,
            glyph_width,
            status_y: 64 - 10,
            scroll_limit: 64 - 18,
        }
    }
}

impl Default for DisplayLayout {
    fn default() -> Self {
        Self::oled_128x64(8)
    }
}

/// Protokoll eines einzelnen Ticks
///
/// Die Core-Crate loggt nicht selbst; die Firmware macht daraus Log-Zeilen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Neuer Lauf-Zustand, falls der Start-Taster gedrückt wurde
    pub toggled: Option<RunState>,
    pub score_reset: bool,
    /// Neuer Slot nach einem Lauflicht-Schritt
    pub advanced_to: Option<usize>,
    /// Anzahl Lauflicht-Schritte seit Start
    pub flicker_count: u32,
    pub verdict: Option<Verdict>,
    pub score: Score,
    /// Fehlgeschlagenes Speichern des Scores (wird nicht wiederholt)
    pub save_failed: Option<StoreError>,
    pub hardware_fault: Option<HardwareFault>,
    /// `hardware_fault` unterscheidet sich vom vorigen Tick
    pub fault_changed: bool,
}

impl TickReport {
    pub(crate) fn record_fault(&mut self, result: Result<(), HardwareFault>) {
        if let Err(fault) = result {
            self.hardware_fault.get_or_insert(fault);
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for TickReport {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "TickReport {{ toggled: {}, reset: {}, advanced_to: {}, verdict: {}, score: {} }}",
            self.toggled,
            self.score_reset,
            self.advanced_to,
            self.verdict,
            self.score
        )
    }
}
