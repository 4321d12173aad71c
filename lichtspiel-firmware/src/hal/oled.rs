// OLED-Display (SSD1306, 128x64) über I2C
//
// Zeichnet in den Buffer des Treibers; erst `present()` überträgt ihn.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;
use lichtspiel_core::{Display, HardwareFault};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

type Driver<'a> = Ssd1306<
    I2CInterface<I2c<'a, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

pub struct OledDisplay<'a> {
    driver: Driver<'a>,
}

impl<'a> OledDisplay<'a> {
    /// Initialisiert den Controller; schlägt fehl, wenn kein Display antwortet
    pub fn new(i2c: I2c<'a, Blocking>) -> Result<Self, HardwareFault> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut driver = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        driver.init().map_err(|_| HardwareFault::BusError)?;
        Ok(Self { driver })
    }
}

impl Display for OledDisplay<'_> {
    fn clear(&mut self) {
        self.driver.clear_buffer();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), HardwareFault> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.driver)
            .map(|_| ())
            .map_err(|_| HardwareFault::DisplayError)
    }

    fn present(&mut self) -> Result<(), HardwareFault> {
        self.driver.flush().map_err(|_| HardwareFault::BusError)
    }
}
