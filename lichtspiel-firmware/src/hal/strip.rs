// LED-Strip über RMT (WS2812/Neopixel)
//
// Hält einen Frame-Buffer; `flush()` überträgt ihn komplett.

use esp_hal::Blocking;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use lichtspiel_core::{HardwareFault, PixelStrip};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::{STRIP_BUFFER_SIZE, STRIP_LEN};

/// WS2812-Strip mit `STRIP_LEN` Pixeln
///
/// Der RMT-Buffer wird im Task erstellt (`smart_led_buffer!`) und
/// hier nur ausgeliehen.
pub struct RmtPixelStrip<'a> {
    led: SmartLedsAdapter<'a, STRIP_BUFFER_SIZE>,
    frame: [RGB8; STRIP_LEN],
}

impl<'a> RmtPixelStrip<'a> {
    /// # Parameter
    /// - `pin`: Datenleitung des Strips
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Puls-Buffer für alle LEDs
    pub fn new(
        pin: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; STRIP_BUFFER_SIZE],
    ) -> Result<Self, HardwareFault> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| HardwareFault::BusError)?;

        Ok(Self {
            led: SmartLedsAdapter::new(rmt.channel0, pin, buffer),
            frame: [RGB8::default(); STRIP_LEN],
        })
    }
}

impl PixelStrip for RmtPixelStrip<'_> {
    fn len(&self) -> usize {
        STRIP_LEN
    }

    fn set(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.frame.get_mut(index) {
            *pixel = color;
        }
    }

    fn flush(&mut self) -> Result<(), HardwareFault> {
        self.led
            .write(self.frame.iter().copied())
            .map_err(|_| HardwareFault::WriteFailed)
    }
}
