//! Spiel-Kontext mit Tick-Funktion
//!
//! Bündelt Taster, Uhr, Score-Speicher, Zustandsautomat und Ausgabe.
//! Die äußere Schleife (Firmware-Task oder Test) ruft nur `tick()` auf.

use crate::button::DebouncedInput;
use crate::game::Game;
use crate::presentation::PresentationSink;
use crate::score::ScoreStore;
use crate::traits::{Clock, DigitalInput, HardwareFault, KeyValueStore};
use crate::types::{GameConfig, RunState, Scene, Score, TickReport, Verdict};

/// Alle Zustände und Kollaborateure des Spiels
///
/// `N` ist die Anzahl der Lauflicht-Slots.
pub struct GameContext<B, C, K, P, const N: usize> {
    start_button: DebouncedInput<B>,
    reset_button: Option<DebouncedInput<B>>,
    clock: C,
    scores: ScoreStore<K>,
    sink: P,
    game: Game,
    score: Score,
    config: GameConfig,
    /// Fehler des vorigen Ticks
    last_fault: Option<HardwareFault>,
}

impl<B, C, K, P, const N: usize> GameContext<B, C, K, P, N>
where
    B: DigitalInput,
    C: Clock,
    K: KeyValueStore,
    P: PresentationSink,
{
    /// Lädt den Score einmalig; ohne gültigen Record startet er bei 0
    pub fn new(
        start_button: B,
        reset_button: Option<B>,
        clock: C,
        store: K,
        sink: P,
        config: GameConfig,
    ) -> Self {
        let mut scores = ScoreStore::new(store);
        let score = scores.load();

        Self {
            start_button: DebouncedInput::new(start_button, config.debounce_ms),
            reset_button: reset_button.map(|pin| DebouncedInput::new(pin, config.debounce_ms)),
            clock,
            scores,
            sink,
            game: Game::new(N, config.dwell_ms(N)),
            score,
            config,
            last_fault: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scores_mut(&mut self) -> &mut ScoreStore<K> {
        &mut self.scores
    }

    /// Ein Durchlauf der Hauptschleife
    ///
    /// Reihenfolge: Start-Taster, Reset-Taster, dann Lauflicht bzw.
    /// Auswertung, zuletzt die RGB-LED.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        self.poll_start_button(&mut report);
        self.poll_reset_button(&mut report);

        if self.game.is_running() {
            self.run_chase_step(&mut report);
        } else {
            self.hold_result(&mut report);
        }

        report.record_fault(self.sink.present(Scene::Ambient, self.score));
        report.score = self.score;
        report.flicker_count = self.game.flicker_count();
        report.fault_changed = report.hardware_fault != self.last_fault;
        self.last_fault = report.hardware_fault;
        report
    }

    fn poll_start_button(&mut self, report: &mut TickReport) {
        let now = self.clock.now_ms();
        if self.start_button.poll(now).is_none() {
            return;
        }

        let state = self.game.on_press(now);
        report.toggled = Some(state);
        if state == RunState::Running {
            report.record_fault(self.sink.present(Scene::Started, self.score));
        }
        self.clock.sleep_ms(self.config.debounce_ms);

        // Erster Slot bekommt die volle Verweilzeit nach der Entprellung
        if state == RunState::Running {
            self.game.restart_dwell(self.clock.now_ms());
        }
    }

    fn poll_reset_button(&mut self, report: &mut TickReport) {
        let now = self.clock.now_ms();
        let pressed = self
            .reset_button
            .as_mut()
            .and_then(|button| button.poll(now))
            .is_some();
        if !pressed {
            return;
        }

        self.score = 0;
        if let Err(err) = self.scores.reset() {
            report.save_failed = Some(err);
        }
        report.score_reset = true;
        report.record_fault(self.sink.present(Scene::ScoreReset, self.score));
        self.clock.sleep_ms(self.config.reset_confirm_ms);
    }

    /// Aktuellen Slot zeigen, Verweilzeit abwarten, dann weiterschalten
    ///
    /// Gewartet wird in festen Quanten; Tasten werden erst im nächsten
    /// Tick wieder abgefragt.
    fn run_chase_step(&mut self, report: &mut TickReport) {
        let position = self.game.position();
        report.record_fault(self.sink.present(Scene::Running { position }, self.score));

        while !self.game.dwell_elapsed(self.clock.now_ms()) {
            self.clock.sleep_ms(self.config.check_interval_ms.max(1));
        }

        report.record_fault(self.sink.present(Scene::Blank, self.score));
        report.advanced_to = self.game.advance(self.clock.now_ms());
    }

    /// Angehaltenes Spiel: Ergebnis halten und bei Sieg einmalig zählen
    fn hold_result(&mut self, report: &mut TickReport) {
        let position = self.game.position();
        let verdict = self.game.evaluate();
        report.verdict = verdict;

        let scene = match verdict {
            Some(Verdict::Won { first }) => {
                if first {
                    self.score = self.score.saturating_add(1);
                    if let Err(err) = self.scores.save(self.score) {
                        report.save_failed = Some(err);
                    }
                }
                Scene::Won { position }
            }
            _ => Scene::Lost { position },
        };

        report.record_fault(self.sink.present(scene, self.score));
        self.clock.sleep_ms(self.config.idle_tick_ms);
    }
}
