// Projekt-Konfiguration: Pin-Belegung und Hardware-Konstanten
//
// Spiel-Parameter (Takt, Entprellung, Farben) stehen in
// `lichtspiel_core::GameConfig`.

// ============================================================================
// Spiel
// ============================================================================

/// Anzahl der Slot-LEDs (= Positionen des Lauflichts)
pub const SLOT_COUNT: usize = 5;

/// GPIO-Pins der Slot-LEDs, der letzte ist der Gewinn-Slot
pub const SLOT_LED_PINS: [u8; SLOT_COUNT] = [18, 19, 20, 21, 22];

/// Start/Stop-Taster (gegen GND, interner Pull-Up)
pub const START_BUTTON_PIN: u8 = 10;

/// Score-Reset-Taster (gegen GND, interner Pull-Up)
pub const RESET_BUTTON_PIN: u8 = 11;

// ============================================================================
// LED-Strip (WS2812/Neopixel)
// ============================================================================

/// GPIO-Pin der Datenleitung
pub const STRIP_GPIO_PIN: u8 = 8;

/// Anzahl der LEDs im Strip
pub const STRIP_LEN: usize = 8;

/// RMT-Buffer: 24 Pulse pro LED + 1 Reset
pub const STRIP_BUFFER_SIZE: usize = STRIP_LEN * 24 + 1;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// OLED (SSD1306, 128x64)
// ============================================================================

pub const I2C_SDA_PIN: u8 = 6;
pub const I2C_SCL_PIN: u8 = 7;

/// I2C Bus-Takt in kHz
pub const I2C_FREQUENCY_KHZ: u32 = 400;

/// Zeichenbreite des Fonts (FONT_6X10)
pub const OLED_GLYPH_WIDTH: i32 = 6;

// ============================================================================
// Buzzer und RGB-LED
// ============================================================================

/// Passiver Buzzer, per Rechtecksignal angesteuert
pub const BUZZER_PIN: u8 = 23;

/// PWM-Pins der RGB-LED (R, G, B)
pub const RGB_LED_PINS: [u8; 3] = [0, 1, 2];

/// PWM-Frequenz der RGB-LED in kHz
pub const RGB_PWM_FREQUENCY_KHZ: u32 = 1;

// ============================================================================
// Score-Speicher
// ============================================================================

/// Flash-Offset des Score-Records (zwei 4 KB Sektoren am Ende von 8 MB)
/// Liegt außerhalb der App-Partition.
pub const SCORE_FLASH_OFFSET: u32 = 0x7F_E000;
