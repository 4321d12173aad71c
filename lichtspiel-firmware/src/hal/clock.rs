// Monotone Uhr auf Basis der Embassy-Zeitbasis

use embassy_time::{Duration, Instant, block_for};
use lichtspiel_core::Clock;

/// Millisekunden seit Boot, läuft nach ~49 Tagen über
#[derive(Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }

    fn sleep_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}
