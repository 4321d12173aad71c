// Einfache GPIO-Kanäle: Taster, Slot-LEDs und Buzzer

use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, InputConfig, InputPin, Level, Output, OutputConfig, OutputPin, Pull};
use lichtspiel_core::{AudioPulse, DigitalInput, DigitalOutput, HardwareFault};

// ============================================================================
// Taster
// ============================================================================

/// Taster gegen GND mit internem Pull-Up: gedrückt = LOW
pub struct GpioButton<'a> {
    input: Input<'a>,
}

impl<'a> GpioButton<'a> {
    pub fn new(pin: impl InputPin + 'a) -> Self {
        let config = InputConfig::default().with_pull(Pull::Up);
        Self {
            input: Input::new(pin, config),
        }
    }
}

impl DigitalInput for GpioButton<'_> {
    fn read(&mut self) -> bool {
        self.input.is_high()
    }
}

// ============================================================================
// Slot-LED
// ============================================================================

pub struct GpioIndicator<'a> {
    output: Output<'a>,
}

impl<'a> GpioIndicator<'a> {
    /// Startet ausgeschaltet
    pub fn new(pin: impl OutputPin + 'a) -> Self {
        Self {
            output: Output::new(pin, Level::Low, OutputConfig::default()),
        }
    }
}

impl DigitalOutput for GpioIndicator<'_> {
    fn write(&mut self, level: bool) -> Result<(), HardwareFault> {
        self.output.set_level(Level::from(level));
        Ok(())
    }
}

// ============================================================================
// Buzzer
// ============================================================================

/// Passiver Buzzer, Rechteck mit 50 % Tastverhältnis
///
/// Blockiert für die gesamte Tondauer.
pub struct GpioBuzzer<'a> {
    output: Output<'a>,
    delay: Delay,
}

impl<'a> GpioBuzzer<'a> {
    pub fn new(pin: impl OutputPin + 'a) -> Self {
        Self {
            output: Output::new(pin, Level::Low, OutputConfig::default()),
            delay: Delay::new(),
        }
    }
}

impl AudioPulse for GpioBuzzer<'_> {
    fn emit(&mut self, duration_ms: u32, frequency_hz: u32) -> Result<(), HardwareFault> {
        if frequency_hz == 0 {
            return Ok(());
        }
        let half_period_us = 500_000 / frequency_hz;
        let cycles = duration_ms.saturating_mul(frequency_hz) / 1000;

        for _ in 0..cycles {
            self.output.set_high();
            self.delay.delay_micros(half_period_us);
            self.output.set_low();
            self.delay.delay_micros(half_period_us);
        }
        Ok(())
    }
}
