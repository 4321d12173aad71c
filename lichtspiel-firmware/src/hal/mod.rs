// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus lichtspiel-core auf esp-hal Peripherie.
// Die Spiel-Logik selbst kennt keinen dieser Typen.

pub mod clock;
pub mod gpio;
pub mod oled;
pub mod rgb_pwm;
pub mod strip;

pub use clock::EmbassyClock;
pub use gpio::{GpioButton, GpioBuzzer, GpioIndicator};
pub use oled::OledDisplay;
pub use rgb_pwm::PwmRgbIndicator;
pub use strip::RmtPixelStrip;
