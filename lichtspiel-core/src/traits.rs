//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zu Taster, LEDs, Display,
//! Buzzer, Speicher und Uhr ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** esp-hal Treiber in `lichtspiel-firmware`
//! - **Testing:** In-Memory Mocks in `lichtspiel-tests`

use rgb::RGB8;

/// Fehler-Typ für Ausgabe-Hardware
///
/// Ein Fehler betrifft immer nur den aktuellen Tick; der Aufrufer
/// protokolliert ihn und macht mit dem nächsten Kanal weiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareFault {
    /// GPIO/PWM/RMT Schreibzugriff fehlgeschlagen
    WriteFailed,
    /// I2C/SPI Bus-Fehler
    BusError,
    /// Display-Treiber hat den Frame abgelehnt
    DisplayError,
}

/// Fehler-Typ für den Key-Value-Speicher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Kein Record vorhanden (z.B. frisch gelöschter Flash)
    Missing,
    /// Record vorhanden, aber nicht lesbar
    Corrupt,
    /// Lese-/Schreibfehler des Speichermediums
    Io,
}

/// Digitaler Eingang (Taster)
///
/// `true` = HIGH. Taster sind mit Pull-Up verdrahtet, gedrückt = LOW.
pub trait DigitalInput {
    fn read(&mut self) -> bool;
}

/// Digitaler Ausgang, eine Instanz pro Anzeige-LED
pub trait DigitalOutput {
    fn write(&mut self, level: bool) -> Result<(), HardwareFault>;
}

/// Adressierbarer LED-Strip (WS2812/Neopixel)
///
/// `set()` schreibt nur in den Frame-Buffer, erst `flush()` überträgt.
pub trait PixelStrip {
    /// Anzahl der Pixel im Strip
    fn len(&self) -> usize;

    fn set(&mut self, index: usize, color: RGB8);

    fn flush(&mut self) -> Result<(), HardwareFault>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Kleines Text-Display (SSD1306 OLED)
pub trait Display {
    fn clear(&mut self);

    /// Zeichnet Text mit der oberen linken Ecke bei (x, y)
    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), HardwareFault>;

    /// Überträgt den Buffer auf das Panel
    fn present(&mut self) -> Result<(), HardwareFault>;
}

/// Piezo-Buzzer
pub trait AudioPulse {
    /// Rechteck-Signal mit 50% Duty-Cycle, blockiert für `duration_ms`
    fn emit(&mut self, duration_ms: u32, frequency_hz: u32) -> Result<(), HardwareFault>;
}

/// Einzelne RGB-LED an drei PWM-Kanälen
pub trait RgbIndicator {
    fn set_color(&mut self, color: RGB8) -> Result<(), HardwareFault>;
}

/// Persistenter Key-Value-Speicher für Ganzzahlen
pub trait KeyValueStore {
    /// `Ok(None)` wenn der Record existiert, der Key aber nicht
    fn read_int(&mut self, key: &str) -> Result<Option<i64>, StoreError>;

    fn write_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Monotone Millisekunden-Uhr
///
/// Der Zähler darf überlaufen, Vergleiche laufen immer über
/// `wrapping_sub` (siehe [`crate::logic::should_advance`]).
pub trait Clock {
    fn now_ms(&self) -> u32;

    /// Blockiert für `ms` Millisekunden
    fn sleep_ms(&mut self, ms: u32);
}
