//! Mock-Implementierungen aller Hardware-Traits
//!
//! Werden von allen Integration-Tests über `mod common;` eingebunden.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use embedded_storage::nor_flash::{ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash};
use lichtspiel_core::{
    AudioPulse, Channels, Clock, DigitalInput, DigitalOutput, Display, DisplayLayout, GameConfig,
    GameContext, HardwareFault, KeyValueStore, PixelStrip, Presenter, RgbIndicator, StoreError,
};
use rgb::RGB8;

pub const SLOTS: usize = 5;
pub const STRIP_LEN: usize = 8;
pub const START_MS: u32 = 1000;

// ============================================================================
// Fake Clock
// ============================================================================

/// Uhr, die nur durch `sleep_ms()` weiterläuft
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<u32>>,
    slept: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn new(start: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
            slept: Rc::new(Cell::new(0)),
        }
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    pub fn total_slept(&self) -> u64 {
        self.slept.get()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
        self.slept.set(self.slept.get() + u64::from(ms));
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Taster, per Hand gesteuert oder nach Zeitplan
///
/// Ein Zeitplan `[(t, level), ...]` liefert den Pegel des letzten
/// Eintrags mit `t <= now`, davor HIGH.
#[derive(Clone)]
pub struct MockButton {
    level: Rc<Cell<bool>>,
    script: Rc<Vec<(u32, bool)>>,
    clock: FakeClock,
}

impl MockButton {
    pub fn manual(clock: &FakeClock) -> Self {
        Self {
            level: Rc::new(Cell::new(true)),
            script: Rc::new(Vec::new()),
            clock: clock.clone(),
        }
    }

    pub fn scripted(clock: &FakeClock, script: Vec<(u32, bool)>) -> Self {
        Self {
            script: Rc::new(script),
            ..Self::manual(clock)
        }
    }

    pub fn push(&self) {
        self.level.set(false);
    }

    pub fn release(&self) {
        self.level.set(true);
    }
}

impl DigitalInput for MockButton {
    fn read(&mut self) -> bool {
        if self.script.is_empty() {
            return self.level.get();
        }
        let now = self.clock.now_ms();
        self.script
            .iter()
            .take_while(|(t, _)| *t <= now)
            .last()
            .map(|(_, level)| *level)
            .unwrap_or(true)
    }
}

// ============================================================================
// Mock Outputs
// ============================================================================

#[derive(Default)]
pub struct MockOutput {
    pub level: bool,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl DigitalOutput for MockOutput {
    fn write(&mut self, level: bool) -> Result<(), HardwareFault> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(HardwareFault::WriteFailed);
        }
        self.level = level;
        self.write_count += 1;
        Ok(())
    }
}

pub struct MockStrip {
    pub pixels: Vec<RGB8>,
    pub flushed: Vec<RGB8>,
    pub flush_count: usize,
    pub fail_next_flush: bool,
}

impl MockStrip {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![RGB8::default(); len],
            flushed: vec![RGB8::default(); len],
            flush_count: 0,
            fail_next_flush: false,
        }
    }
}

impl PixelStrip for MockStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn flush(&mut self) -> Result<(), HardwareFault> {
        if self.fail_next_flush {
            self.fail_next_flush = false;
            return Err(HardwareFault::WriteFailed);
        }
        self.flushed = self.pixels.clone();
        self.flush_count += 1;
        Ok(())
    }
}

/// Text mit Position (x, y)
pub type TextItem = (String, i32, i32);

#[derive(Default)]
pub struct MockDisplay {
    pub buffer: Vec<TextItem>,
    /// Zuletzt übertragener Frame
    pub shown: Vec<TextItem>,
    /// Alle übertragenen Frames in Reihenfolge
    pub frames: Vec<Vec<TextItem>>,
    pub present_count: usize,
    pub fail_next_present: bool,
}

impl MockDisplay {
    pub fn shows(&self, text: &str) -> bool {
        self.shown.iter().any(|(t, _, _)| t == text)
    }

    pub fn ever_showed(&self, text: &str) -> bool {
        self.frames
            .iter()
            .any(|frame| frame.iter().any(|(t, _, _)| t == text))
    }

    pub fn position_of(&self, text: &str) -> Option<(i32, i32)> {
        self.shown
            .iter()
            .find(|(t, _, _)| t == text)
            .map(|(_, x, y)| (*x, *y))
    }
}

impl Display for MockDisplay {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), HardwareFault> {
        self.buffer.push((text.to_string(), x, y));
        Ok(())
    }

    fn present(&mut self) -> Result<(), HardwareFault> {
        if self.fail_next_present {
            self.fail_next_present = false;
            return Err(HardwareFault::BusError);
        }
        self.shown = self.buffer.clone();
        self.frames.push(self.buffer.clone());
        self.present_count += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockBuzzer {
    pub pulses: Vec<(u32, u32)>,
}

impl AudioPulse for MockBuzzer {
    fn emit(&mut self, duration_ms: u32, frequency_hz: u32) -> Result<(), HardwareFault> {
        self.pulses.push((duration_ms, frequency_hz));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockRgb {
    pub colors: Vec<RGB8>,
}

impl RgbIndicator for MockRgb {
    fn set_color(&mut self, color: RGB8) -> Result<(), HardwareFault> {
        self.colors.push(color);
        Ok(())
    }
}

// ============================================================================
// Mock Speicher
// ============================================================================

/// Key-Value-Speicher im RAM, von außen inspizierbar
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub values: Rc<RefCell<HashMap<String, i64>>>,
    pub writes: Rc<Cell<usize>>,
    pub fail_reads: Option<StoreError>,
    pub fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn with_score(score: i64) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert("wins".to_string(), score);
        store
    }

    pub fn stored_score(&self) -> Option<i64> {
        self.values.borrow().get("wins").copied()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_int(&mut self, key: &str) -> Result<Option<i64>, StoreError> {
        if let Some(err) = self.fail_reads {
            return Err(err);
        }
        if self.values.borrow().is_empty() {
            return Err(StoreError::Missing);
        }
        Ok(self.values.borrow().get(key).copied())
    }

    fn write_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Io);
        }
        self.values.borrow_mut().insert(key.to_string(), value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// NOR-Flash im RAM: Schreiben löscht nur Bits, Erase setzt auf 0xFF
pub struct RamFlash {
    pub data: Vec<u8>,
    /// Nächster Schreibvorgang bricht nach so vielen Bytes ab
    pub tear_next_write_after: Option<usize>,
    pub erase_count: usize,
}

impl RamFlash {
    pub const SECTOR: usize = 4096;

    pub fn new(sectors: usize) -> Self {
        Self {
            data: vec![0xFF; sectors * Self::SECTOR],
            tear_next_write_after: None,
            erase_count: 0,
        }
    }
}

impl ErrorType for RamFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for RamFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let end = start + bytes.len();
        if end > self.data.len() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        bytes.copy_from_slice(&self.data[start..end]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl NorFlash for RamFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = Self::SECTOR;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        let (from, to) = (from as usize, to as usize);
        if to > self.data.len() || from % Self::SECTOR != 0 {
            return Err(NorFlashErrorKind::NotAligned);
        }
        self.data[from..to].fill(0xFF);
        self.erase_count += 1;
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        if start + bytes.len() > self.data.len() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        let limit = self.tear_next_write_after.take().unwrap_or(bytes.len());
        for (cell, byte) in self.data[start..].iter_mut().zip(bytes.iter().take(limit)) {
            *cell &= *byte;
        }
        if limit < bytes.len() {
            return Err(NorFlashErrorKind::Other);
        }
        Ok(())
    }
}

// ============================================================================
// Test-Aufbau
// ============================================================================

pub type TestPresenter = Presenter<MockOutput, MockStrip, MockDisplay, MockBuzzer, MockRgb, SLOTS>;

pub type TestGame = GameContext<MockButton, FakeClock, MemoryStore, TestPresenter, SLOTS>;

pub fn full_channels() -> Channels<MockOutput, MockStrip, MockDisplay, MockBuzzer, MockRgb, SLOTS> {
    Channels {
        indicators: Some(Default::default()),
        strip: Some(MockStrip::new(STRIP_LEN)),
        display: Some(MockDisplay::default()),
        buzzer: Some(MockBuzzer::default()),
        rgb: Some(MockRgb::default()),
    }
}

pub fn presenter() -> TestPresenter {
    Presenter::new(full_channels(), &GameConfig::default(), DisplayLayout::default())
}

/// Spiel mit allen Kanälen, Start- und Reset-Taster per Hand
pub struct Rig {
    pub game: TestGame,
    pub clock: FakeClock,
    pub start: MockButton,
    pub reset: MockButton,
    pub store: MemoryStore,
}

impl Rig {
    pub fn new(store: MemoryStore) -> Self {
        let clock = FakeClock::new(START_MS);
        let start = MockButton::manual(&clock);
        let reset = MockButton::manual(&clock);
        let game = GameContext::new(
            start.clone(),
            Some(reset.clone()),
            clock.clone(),
            store.clone(),
            presenter(),
            GameConfig::default(),
        );
        Self {
            game,
            clock,
            start,
            reset,
            store,
        }
    }

    /// Ein Tick mit gedrücktem Start-Taster, danach wieder losgelassen
    pub fn press_start(&mut self) -> lichtspiel_core::TickReport {
        self.start.push();
        let report = self.game.tick();
        self.start.release();
        report
    }

    pub fn press_reset(&mut self) -> lichtspiel_core::TickReport {
        self.reset.push();
        let report = self.game.tick();
        self.reset.release();
        report
    }

    pub fn indicator_levels(&self) -> Vec<bool> {
        self.game
            .sink()
            .channels()
            .indicators
            .as_ref()
            .map(|leds| leds.iter().map(|led| led.level).collect())
            .unwrap_or_default()
    }

    pub fn display(&self) -> &MockDisplay {
        self.game.sink().channels().display.as_ref().unwrap()
    }

    pub fn strip(&self) -> &MockStrip {
        self.game.sink().channels().strip.as_ref().unwrap()
    }

    pub fn buzzer(&self) -> &MockBuzzer {
        self.game.sink().channels().buzzer.as_ref().unwrap()
    }
}
