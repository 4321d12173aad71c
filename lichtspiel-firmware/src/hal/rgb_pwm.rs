// RGB-LED über drei LEDC-Kanäle (Low-Speed, 8 Bit)

use esp_hal::gpio::DriveMode;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::time::Rate;
use lichtspiel_core::logic::channel_to_percent;
use lichtspiel_core::{HardwareFault, RgbIndicator};
use rgb::RGB8;
use static_cell::StaticCell;

type PwmChannel = channel::Channel<'static, LowSpeed>;
type PwmTimer = timer::Timer<'static, LowSpeed>;

// Kanäle leihen sich LEDC-Einheit und Timer für immer
static LEDC: StaticCell<Ledc<'static>> = StaticCell::new();
static PWM_TIMER: StaticCell<PwmTimer> = StaticCell::new();

pub struct PwmRgbIndicator {
    red: PwmChannel,
    green: PwmChannel,
    blue: PwmChannel,
}

impl PwmRgbIndicator {
    /// Konfiguriert Timer0 und die Kanäle 0..2, alle Kanäle starten aus
    ///
    /// Darf nur einmal aufgerufen werden (statische LEDC-Einheit).
    pub fn new(
        peripheral: esp_hal::peripherals::LEDC<'static>,
        frequency_khz: u32,
        red_pin: impl PeripheralOutput<'static>,
        green_pin: impl PeripheralOutput<'static>,
        blue_pin: impl PeripheralOutput<'static>,
    ) -> Result<Self, HardwareFault> {
        let ledc = LEDC.init(Ledc::new(peripheral));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
        let ledc: &'static Ledc<'static> = ledc;

        let mut pwm_timer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
        pwm_timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(frequency_khz),
            })
            .map_err(|_| HardwareFault::BusError)?;
        let pwm_timer: &'static PwmTimer = PWM_TIMER.init(pwm_timer);

        Ok(Self {
            red: open_channel(ledc, pwm_timer, channel::Number::Channel0, red_pin)?,
            green: open_channel(ledc, pwm_timer, channel::Number::Channel1, green_pin)?,
            blue: open_channel(ledc, pwm_timer, channel::Number::Channel2, blue_pin)?,
        })
    }
}

fn open_channel(
    ledc: &'static Ledc<'static>,
    pwm_timer: &'static PwmTimer,
    number: channel::Number,
    pin: impl PeripheralOutput<'static>,
) -> Result<PwmChannel, HardwareFault> {
    let mut pwm = ledc.channel(number, pin);
    pwm.configure(channel::config::Config {
        timer: pwm_timer,
        duty_pct: 0,
        drive_mode: DriveMode::PushPull,
    })
    .map_err(|_| HardwareFault::BusError)?;
    Ok(pwm)
}

impl RgbIndicator for PwmRgbIndicator {
    fn set_color(&mut self, color: RGB8) -> Result<(), HardwareFault> {
        let red = self.red.set_duty(channel_to_percent(color.r));
        let green = self.green.set_duty(channel_to_percent(color.g));
        let blue = self.blue.set_duty(channel_to_percent(color.b));
        red.and(green)
            .and(blue)
            .map_err(|_| HardwareFault::WriteFailed)
    }
}
