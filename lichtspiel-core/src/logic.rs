//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use core::ops::Range;

use rgb::RGB8;

/// Grundfarbe: Spiel aktiv bzw. verloren
pub const ACTIVE_RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };

/// Markierung des aktuellen Slots im Lauflicht
pub const CHASE_WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Prüft ob seit `last` mindestens `interval` Millisekunden vergangen sind
///
/// Nutzt `wrapping_sub`, bleibt also beim Überlauf des Zählers korrekt.
///
/// # Beispiele
///
/// ```
/// # use lichtspiel_core::should_advance;
/// assert!(should_advance(100, 30, 66));
/// assert!(!should_advance(90, 30, 66));
/// // Zähler ist übergelaufen: 5 - (u32::MAX - 60) = 66
/// assert!(should_advance(5, u32::MAX - 60, 66));
/// ```
pub fn should_advance(now: u32, last: u32, interval: u32) -> bool {
    now.wrapping_sub(last) >= interval
}

/// Farbrad: Position 0..=255 → RGB
///
/// Rot → Grün → Blau → Rot in drei Abschnitten zu je 85 Schritten.
pub fn wheel(pos: u8) -> RGB8 {
    match pos {
        0..=84 => RGB8 {
            r: 255 - pos * 3,
            g: pos * 3,
            b: 0,
        },
        85..=169 => {
            let pos = pos - 85;
            RGB8 {
                r: 0,
                g: 255 - pos * 3,
                b: pos * 3,
            }
        }
        _ => {
            let pos = pos - 170;
            RGB8 {
                r: pos * 3,
                g: 0,
                b: 255 - pos * 3,
            }
        }
    }
}

/// Farbe von Pixel `index` eines Regenbogens über `len` Pixel
pub fn rainbow_pixel(index: usize, len: usize, offset: u8) -> RGB8 {
    if len == 0 {
        return wheel(offset);
    }
    let base = (index * 256 / len) % 256;
    wheel((base as u8).wrapping_add(offset))
}

/// Pixel-Bereich des Strips, der zu `slot` von `slots` gehört
pub fn chase_segment(slot: usize, slots: usize, len: usize) -> Range<usize> {
    if slots == 0 {
        return 0..0;
    }
    let start = slot * len / slots;
    let end = (slot + 1) * len / slots;
    // Kurze Strips: jeder Slot bekommt mindestens ein Pixel
    if start == end && start < len {
        start..start + 1
    } else {
        start..end
    }
}

/// Skaliert einen 8-Bit Farbkanal auf Prozent (PWM Duty)
pub fn channel_to_percent(value: u8) -> u8 {
    ((value as u16 * 100 + 127) / 255) as u8
}
