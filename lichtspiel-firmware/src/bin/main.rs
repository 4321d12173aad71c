// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_lichtspiel::config::{
    BUZZER_PIN, RESET_BUTTON_PIN, SLOT_LED_PINS, START_BUTTON_PIN, STRIP_GPIO_PIN,
};
use esp_lichtspiel::tasks::{GameHardware, game_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt den Spiel-Task.
/// Danach schläft main() - alle Arbeit läuft im Task.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    defmt::info!(
        "Lichtspiel: slots {}, start GPIO{}, reset GPIO{}, strip GPIO{}, buzzer GPIO{}",
        SLOT_LED_PINS,
        START_BUTTON_PIN,
        RESET_BUTTON_PIN,
        STRIP_GPIO_PIN,
        BUZZER_PIN
    );

    // Peripherie an den Spiel-Task übergeben (Pins siehe config.rs)
    let hardware = GameHardware {
        slot_leds: (
            peripherals.GPIO18,
            peripherals.GPIO19,
            peripherals.GPIO20,
            peripherals.GPIO21,
            peripherals.GPIO22,
        ),
        start_button: peripherals.GPIO10,
        reset_button: peripherals.GPIO11,
        strip_pin: peripherals.GPIO8,
        rmt: peripherals.RMT,
        i2c: peripherals.I2C0,
        sda: peripherals.GPIO6,
        scl: peripherals.GPIO7,
        buzzer: peripherals.GPIO23,
        ledc: peripherals.LEDC,
        rgb_pins: (peripherals.GPIO0, peripherals.GPIO1, peripherals.GPIO2),
        flash: peripherals.FLASH,
    };

    spawner.spawn(game_task(hardware)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
