//! Presentation Sink
//!
//! Verteilt eine [`Scene`] auf bis zu fünf Ausgabe-Kanäle:
//! Slot-LEDs, LED-Strip, OLED, Buzzer und RGB-LED. Fehlt ein Kanal
//! (`None`), wird er übersprungen.
//!
//! Alle Kanäle werden in jedem Tick neu gezeichnet, auch ohne Änderung.

use core::fmt::Write;

use heapless::String;
use rgb::RGB8;

use crate::logic::{ACTIVE_RED, CHASE_WHITE, chase_segment, rainbow_pixel, wheel};
use crate::sequencer::HueWheel;
use crate::traits::{AudioPulse, DigitalOutput, Display, HardwareFault, PixelStrip, RgbIndicator};
use crate::types::{DisplayLayout, GameConfig, Scene, Score, Tone};

pub const PLAYING_TEXT: &str = "Playing Game";
pub const WON_TEXT: &str = "Game Won!";
pub const LOST_TEXT: &str = "Game Over :(";
pub const RESET_TEXT: &str = "Score Reset!";

/// Empfänger der Szenen, die der Spiel-Kontext erzeugt
pub trait PresentationSink {
    /// Rendert `scene` auf alle Kanäle
    ///
    /// Fällt ein Kanal aus, werden die übrigen trotzdem gerendert;
    /// zurückgegeben wird der erste Fehler.
    fn present(&mut self, scene: Scene, score: Score) -> Result<(), HardwareFault>;
}

/// Vertikale Laufschrift, pendelt zwischen 0 und `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollText {
    y: i32,
    direction: i32,
    step: i32,
    limit: i32,
}

impl ScrollText {
    pub const fn new(step: i32, limit: i32) -> Self {
        Self {
            y: 0,
            direction: 1,
            step,
            limit,
        }
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Nächste Position; dreht vor dem Verlassen der Grenzen um
    pub fn step(&mut self) -> i32 {
        let mut next = self.y + self.direction * self.step;
        if next > self.limit || next < 0 {
            self.direction = -self.direction;
            next = self.y + self.direction * self.step;
        }
        self.y = next.clamp(0, self.limit.max(0));
        self.y
    }
}

/// Ausgabe-Kanäle, jeder optional
pub struct Channels<O, S, D, A, I, const N: usize> {
    pub indicators: Option<[O; N]>,
    pub strip: Option<S>,
    pub display: Option<D>,
    pub buzzer: Option<A>,
    pub rgb: Option<I>,
}

impl<O, S, D, A, I, const N: usize> Default for Channels<O, S, D, A, I, N> {
    fn default() -> Self {
        Self {
            indicators: None,
            strip: None,
            display: None,
            buzzer: None,
            rgb: None,
        }
    }
}

/// Standard-Implementierung von [`PresentationSink`] über die Hardware-Traits
pub struct Presenter<O, S, D, A, I, const N: usize> {
    channels: Channels<O, S, D, A, I, N>,
    layout: DisplayLayout,
    scroll: ScrollText,
    strip_hue: HueWheel,
    indicator_hue: HueWheel,
    win_tone: Tone,
}

impl<O, S, D, A, I, const N: usize> Presenter<O, S, D, A, I, N>
where
    O: DigitalOutput,
    S: PixelStrip,
    D: Display,
    A: AudioPulse,
    I: RgbIndicator,
{
    pub fn new(channels: Channels<O, S, D, A, I, N>, config: &GameConfig, layout: DisplayLayout) -> Self {
        Self {
            channels,
            layout,
            scroll: ScrollText::new(config.scroll_step, layout.scroll_limit),
            strip_hue: HueWheel::new(config.strip_hue_step),
            indicator_hue: HueWheel::new(config.indicator_hue_step),
            win_tone: config.win_tone,
        }
    }

    pub fn channels(&self) -> &Channels<O, S, D, A, I, N> {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut Channels<O, S, D, A, I, N> {
        &mut self.channels
    }

    pub fn scroll(&self) -> &ScrollText {
        &self.scroll
    }

    pub fn strip_hue(&self) -> u8 {
        self.strip_hue.offset()
    }

    // ------------------------------------------------------------------
    // Slot-LEDs
    // ------------------------------------------------------------------

    fn light_slot(&mut self, active: Option<usize>) -> Result<(), HardwareFault> {
        let Some(indicators) = self.channels.indicators.as_mut() else {
            return Ok(());
        };
        let mut result = Ok(());
        for (slot, led) in indicators.iter_mut().enumerate() {
            result = result.and(led.write(active == Some(slot)));
        }
        result
    }

    // ------------------------------------------------------------------
    // LED-Strip
    // ------------------------------------------------------------------

    fn fill_strip(&mut self, color: RGB8) -> Result<(), HardwareFault> {
        let Some(strip) = self.channels.strip.as_mut() else {
            return Ok(());
        };
        for index in 0..strip.len() {
            strip.set(index, color);
        }
        strip.flush()
    }

    fn chase_strip(&mut self, position: usize) -> Result<(), HardwareFault> {
        let Some(strip) = self.channels.strip.as_mut() else {
            return Ok(());
        };
        let lit = chase_segment(position, N, strip.len());
        for index in 0..strip.len() {
            let color = if lit.contains(&index) {
                CHASE_WHITE
            } else {
                ACTIVE_RED
            };
            strip.set(index, color);
        }
        strip.flush()
    }

    fn rainbow_strip(&mut self) -> Result<(), HardwareFault> {
        let offset = self.strip_hue.offset();
        self.strip_hue.advance();

        let Some(strip) = self.channels.strip.as_mut() else {
            return Ok(());
        };
        let len = strip.len();
        for index in 0..len {
            strip.set(index, rainbow_pixel(index, len, offset));
        }
        strip.flush()
    }

    // ------------------------------------------------------------------
    // OLED
    // ------------------------------------------------------------------

    fn draw_screen(
        &mut self,
        headline: &str,
        headline_y: i32,
        position: Option<usize>,
        score: Score,
    ) -> Result<(), HardwareFault> {
        let layout = self.layout;
        let Some(display) = self.channels.display.as_mut() else {
            return Ok(());
        };

        display.clear();
        display.draw_text(headline, 0, headline_y)?;

        if let Some(position) = position {
            let mut light: String<16> = String::new();
            let _ = write!(light, "L:{}", position + 1);
            display.draw_text(&light, 0, layout.status_y)?;
        }

        let mut wins: String<16> = String::new();
        let _ = write!(wins, "W:{}", score);
        let x = layout.width - wins.len() as i32 * layout.glyph_width;
        display.draw_text(&wins, x, layout.status_y)?;

        display.present()
    }

    fn draw_scrolling(&mut self, position: usize, score: Score) -> Result<(), HardwareFault> {
        let y = self.scroll.y();
        let result = self.draw_screen(PLAYING_TEXT, y, Some(position), score);
        self.scroll.step();
        result
    }

    // ------------------------------------------------------------------
    // Buzzer und RGB-LED
    // ------------------------------------------------------------------

    fn sound_win(&mut self) -> Result<(), HardwareFault> {
        let tone = self.win_tone;
        match self.channels.buzzer.as_mut() {
            Some(buzzer) => buzzer.emit(tone.duration_ms, tone.frequency_hz),
            None => Ok(()),
        }
    }

    fn cycle_rgb(&mut self) -> Result<(), HardwareFault> {
        let color = wheel(self.indicator_hue.advance());
        match self.channels.rgb.as_mut() {
            Some(rgb) => rgb.set_color(color),
            None => Ok(()),
        }
    }
}

impl<O, S, D, A, I, const N: usize> PresentationSink for Presenter<O, S, D, A, I, N>
where
    O: DigitalOutput,
    S: PixelStrip,
    D: Display,
    A: AudioPulse,
    I: RgbIndicator,
{
    fn present(&mut self, scene: Scene, score: Score) -> Result<(), HardwareFault> {
        match scene {
            Scene::Started => self.fill_strip(ACTIVE_RED),
            Scene::Running { position } => self
                .draw_scrolling(position, score)
                .and(self.light_slot(Some(position)))
                .and(self.chase_strip(position)),
            Scene::Blank => self.light_slot(None),
            Scene::Won { position } => self
                .light_slot(Some(position))
                .and(self.draw_screen(WON_TEXT, 0, Some(position), score))
                .and(self.rainbow_strip())
                .and(self.sound_win()),
            Scene::Lost { position } => self
                .light_slot(Some(position))
                .and(self.draw_screen(LOST_TEXT, 0, Some(position), score))
                .and(self.fill_strip(ACTIVE_RED)),
            Scene::ScoreReset => self.draw_screen(RESET_TEXT, 0, None, score),
            Scene::Ambient => self.cycle_rgb(),
        }
    }
}
