// Spiel-Task - Lauflicht mit Taster, Strip, OLED, Buzzer und RGB-LED
use defmt::{error, info, warn};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::peripherals::{
    FLASH, GPIO0, GPIO1, GPIO2, GPIO6, GPIO7, GPIO8, GPIO10, GPIO11, GPIO18, GPIO19, GPIO20,
    GPIO21, GPIO22, GPIO23, I2C0, LEDC, RMT,
};
use esp_hal::time::Rate;
use esp_hal_smartled::smart_led_buffer;
use esp_storage::FlashStorage;
use lichtspiel_core::{
    Channels, Clock, DigitalInput, DisplayLayout, FlashRecordStore, GameConfig, GameContext,
    HardwareFault, KeyValueStore, PresentationSink, Presenter, RunState, TickReport, Verdict,
};

use crate::config::{
    I2C_FREQUENCY_KHZ, OLED_GLYPH_WIDTH, RGB_PWM_FREQUENCY_KHZ, RMT_CLOCK_MHZ,
    SCORE_FLASH_OFFSET, SLOT_COUNT, STRIP_LEN,
};
use crate::hal::{
    EmbassyClock, GpioButton, GpioBuzzer, GpioIndicator, OledDisplay, PwmRgbIndicator,
    RmtPixelStrip,
};

/// Alle Peripherie, die der Spiel-Task übernimmt
pub struct GameHardware {
    pub slot_leds: (
        GPIO18<'static>,
        GPIO19<'static>,
        GPIO20<'static>,
        GPIO21<'static>,
        GPIO22<'static>,
    ),
    pub start_button: GPIO10<'static>,
    pub reset_button: GPIO11<'static>,
    pub strip_pin: GPIO8<'static>,
    pub rmt: RMT<'static>,
    pub i2c: I2C0<'static>,
    pub sda: GPIO6<'static>,
    pub scl: GPIO7<'static>,
    pub buzzer: GPIO23<'static>,
    pub ledc: LEDC<'static>,
    pub rgb_pins: (GPIO0<'static>, GPIO1<'static>, GPIO2<'static>),
    pub flash: FLASH<'static>,
}

/// Spiel-Schleife - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// Ruft `tick()` endlos auf und macht aus jedem `TickReport` Log-Zeilen.
/// Zwischen zwei Ticks wird an andere Tasks abgegeben.
pub async fn game_loop<B, C, K, P, const N: usize>(mut game: GameContext<B, C, K, P, N>) -> !
where
    B: DigitalInput,
    C: Clock,
    K: KeyValueStore,
    P: PresentationSink,
{
    info!("Game ready, wins: {}", game.score());

    loop {
        let report = game.tick();
        log_report(&report);
        embassy_futures::yield_now().await;
    }
}

fn log_report(report: &TickReport) {
    match report.toggled {
        Some(RunState::Running) => info!("Game started"),
        Some(RunState::Stopped) => match report.verdict {
            Some(Verdict::Won { .. }) => info!("Game won! Wins: {}", report.score),
            _ => info!("Game over"),
        },
        None => {}
    }

    if report.score_reset {
        info!("Score reset");
    }

    if let Some(slot) = report.advanced_to {
        info!("Flicker #{} - LED {} is ON", report.flicker_count, slot + 1);
    }

    if let Some(err) = report.save_failed {
        warn!("Score not saved: {}", err);
    }

    // Dauerhafte Fehler nur beim Wechsel melden, nicht jeden Tick
    if report.fault_changed {
        match report.hardware_fault {
            Some(fault) => warn!("Output failed: {}", fault),
            None => info!("Outputs recovered"),
        }
    }
}

/// Spiel-Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Hardware-Initialisierung und ruft dann
/// die testbare `game_loop()` Funktion auf. Kanäle, deren
/// Initialisierung fehlschlägt, fehlen im Spiel statt es zu stoppen.
#[embassy_executor::task]
pub async fn game_task(hw: GameHardware) {
    // Buffer für SmartLED Daten erstellen (STRIP_LEN LEDs)
    let mut rmt_buffer = smart_led_buffer!(STRIP_LEN);

    let strip = RmtPixelStrip::new(hw.strip_pin, hw.rmt, RMT_CLOCK_MHZ, &mut rmt_buffer)
        .inspect_err(|fault| error!("LED strip init failed: {}", fault))
        .ok();

    let display = I2c::new(
        hw.i2c,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )
    .map_err(|_| HardwareFault::BusError)
    .map(|i2c| i2c.with_sda(hw.sda).with_scl(hw.scl))
    .and_then(OledDisplay::new)
    .inspect_err(|fault| error!("OLED init failed: {}", fault))
    .ok();

    let (red, green, blue) = hw.rgb_pins;
    let rgb = PwmRgbIndicator::new(hw.ledc, RGB_PWM_FREQUENCY_KHZ, red, green, blue)
        .inspect_err(|fault| error!("RGB LED init failed: {}", fault))
        .ok();

    let (led0, led1, led2, led3, led4) = hw.slot_leds;
    let indicators: [GpioIndicator<'static>; SLOT_COUNT] = [
        GpioIndicator::new(led0),
        GpioIndicator::new(led1),
        GpioIndicator::new(led2),
        GpioIndicator::new(led3),
        GpioIndicator::new(led4),
    ];

    let config = GameConfig::default();
    let presenter: Presenter<_, _, _, _, _, SLOT_COUNT> = Presenter::new(
        Channels {
            indicators: Some(indicators),
            strip,
            display,
            buzzer: Some(GpioBuzzer::new(hw.buzzer)),
            rgb,
        },
        &config,
        DisplayLayout::oled_128x64(OLED_GLYPH_WIDTH),
    );

    let store = FlashRecordStore::new(FlashStorage::new(hw.flash), SCORE_FLASH_OFFSET);

    let game: GameContext<_, _, _, _, SLOT_COUNT> = GameContext::new(
        GpioButton::new(hw.start_button),
        Some(GpioButton::new(hw.reset_button)),
        EmbassyClock,
        store,
        presenter,
        config,
    );

    // Business Logic aufrufen
    game_loop(game).await
}
