//! Score-Speicher
//!
//! Lädt und speichert die Anzahl der Siege über einen [`KeyValueStore`].
//! Jeder Ladefehler zählt als "noch kein Score" (= 0).

use crate::traits::{KeyValueStore, StoreError};
use crate::types::Score;

/// Key des Siegzählers im persistierten Record
pub const SCORE_KEY: &str = "wins";

/// Grund, warum kein Score geladen werden konnte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Kein Record gespeichert
    Missing,
    /// Record ohne `"wins"` oder nicht lesbar
    Malformed,
    /// Wert negativ oder zu groß
    OutOfRange(i64),
    Store(StoreError),
}

impl From<StoreError> for LoadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing => LoadError::Missing,
            StoreError::Corrupt => LoadError::Malformed,
            StoreError::Io => LoadError::Store(err),
        }
    }
}

/// Besitzt den Siegzähler und den Speicher dahinter
pub struct ScoreStore<K> {
    store: K,
}

impl<K: KeyValueStore> ScoreStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Liest den Score mit genauer Fehlerursache
    pub fn try_load(&mut self) -> Result<Score, LoadError> {
        let value = self
            .store
            .read_int(SCORE_KEY)?
            .ok_or(LoadError::Malformed)?;
        Score::try_from(value).map_err(|_| LoadError::OutOfRange(value))
    }

    /// Liest den Score, jeder Fehler ergibt 0
    pub fn load(&mut self) -> Score {
        self.try_load().unwrap_or(0)
    }

    pub fn save(&mut self, score: Score) -> Result<(), StoreError> {
        self.store.write_int(SCORE_KEY, i64::from(score))
    }

    /// Setzt den Score auf 0. Steht bereits 0 im Speicher, wird nicht geschrieben.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        if self.try_load() == Ok(0) {
            return Ok(());
        }
        self.save(0)
    }

    pub fn into_inner(self) -> K {
        self.store
    }
}
