//! Persistenter Record im NOR-Flash
//!
//! Der Record ist ein JSON-Objekt mit Ganzzahl-Werten, z.B. `{"wins":7}`.
//! Er liegt doppelt gepuffert in zwei Erase-Sektoren:
//!
//! ```text
//! Slot = | magic "LS" (2) | sequence u32 LE (4) | length u16 LE (2) | JSON ... | 0xFF ... |
//! ```
//!
//! Geschrieben wird immer der Slot, der *nicht* den neuesten Record
//! enthält. Gelesen wird der gültige Slot mit der höchsten Sequenz.
//! Ein abgebrochener Schreibvorgang lässt den vorherigen Record intakt.

use embedded_storage::nor_flash::NorFlash;
use heapless::{LinearMap, String};

use crate::traits::{KeyValueStore, StoreError};

/// Maximale Key-Länge im Record
pub const MAX_KEY_LEN: usize = 16;

/// Maximale Anzahl Keys im Record
pub const MAX_KEYS: usize = 4;

/// Inhalt des Records
pub type Record = LinearMap<String<MAX_KEY_LEN>, i64, MAX_KEYS>;

const MAGIC: [u8; 2] = *b"LS";
const HEADER_LEN: usize = 8;

/// Bytes pro Slot, Vielfaches jeder üblichen Write-Size
pub const SLOT_BYTES: usize = 64;

const SLOT_COUNT: usize = 2;

/// Serialisiert den Record als JSON, liefert die Anzahl Bytes
pub fn encode_record(record: &Record, out: &mut [u8]) -> Result<usize, StoreError> {
    serde_json_core::to_slice(record, out).map_err(|_| StoreError::Corrupt)
}

pub fn decode_record(json: &[u8]) -> Result<Record, StoreError> {
    serde_json_core::from_slice::<Record>(json)
        .map(|(record, _)| record)
        .map_err(|_| StoreError::Corrupt)
}

/// Inhalt eines gültigen Slots
struct SlotContent {
    slot: usize,
    sequence: u32,
    record: Record,
}

/// [`KeyValueStore`] auf einem NOR-Flash (esp-storage, RAM-Mock, ...)
pub struct FlashRecordStore<F> {
    flash: F,
    base: u32,
}

impl<F: NorFlash> FlashRecordStore<F> {
    /// `base` muss auf einen Erase-Sektor ausgerichtet sein; belegt werden
    /// zwei Sektoren ab `base`.
    pub fn new(flash: F, base: u32) -> Self {
        Self { flash, base }
    }

    pub fn into_inner(self) -> F {
        self.flash
    }

    fn slot_addr(&self, slot: usize) -> u32 {
        self.base + (slot * F::ERASE_SIZE) as u32
    }

    /// `Ok(None)` für leere Slots oder fremde Daten
    fn read_slot(&mut self, slot: usize) -> Result<Option<SlotContent>, StoreError> {
        let mut buf = [0u8; SLOT_BYTES];
        self.flash
            .read(self.slot_addr(slot), &mut buf)
            .map_err(|_| StoreError::Io)?;

        if buf[0..2] != MAGIC {
            return Ok(None);
        }
        let sequence = u32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]);
        let len = u16::from_le_bytes([buf[6], buf[7]]) as usize;
        if len > SLOT_BYTES - HEADER_LEN {
            return Err(StoreError::Corrupt);
        }

        let record = decode_record(&buf[HEADER_LEN..HEADER_LEN + len])?;
        Ok(Some(SlotContent {
            slot,
            sequence,
            record,
        }))
    }

    fn read_newest(&mut self) -> Result<SlotContent, StoreError> {
        let mut newest: Option<SlotContent> = None;
        let mut corrupt = false;

        for slot in 0..SLOT_COUNT {
            match self.read_slot(slot) {
                Ok(Some(content)) => {
                    if newest
                        .as_ref()
                        .is_none_or(|current| content.sequence > current.sequence)
                    {
                        newest = Some(content);
                    }
                }
                Ok(None) => {}
                Err(StoreError::Corrupt) => corrupt = true,
                Err(err) => return Err(err),
            }
        }

        match newest {
            Some(content) => Ok(content),
            None if corrupt => Err(StoreError::Corrupt),
            None => Err(StoreError::Missing),
        }
    }

    fn write_slot(&mut self, slot: usize, sequence: u32, record: &Record) -> Result<(), StoreError> {
        let mut buf = [0xFFu8; SLOT_BYTES];
        let len = encode_record(record, &mut buf[HEADER_LEN..])?;

        buf[0..2].copy_from_slice(&MAGIC);
        buf[2..6].copy_from_slice(&sequence.to_le_bytes());
        buf[6..8].copy_from_slice(&(len as u16).to_le_bytes());

        let addr = self.slot_addr(slot);
        self.flash
            .erase(addr, addr + F::ERASE_SIZE as u32)
            .map_err(|_| StoreError::Io)?;
        self.flash.write(addr, &buf).map_err(|_| StoreError::Io)
    }
}

impl<F: NorFlash> KeyValueStore for FlashRecordStore<F> {
    fn read_int(&mut self, key: &str) -> Result<Option<i64>, StoreError> {
        let content = self.read_newest()?;
        Ok(content
            .record
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, value)| *value))
    }

    fn write_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        let (slot, sequence, mut record) = match self.read_newest() {
            Ok(content) => (
                (content.slot + 1) % SLOT_COUNT,
                content.sequence.wrapping_add(1),
                content.record,
            ),
            Err(StoreError::Missing | StoreError::Corrupt) => (0, 1, Record::new()),
            Err(err) => return Err(err),
        };

        let key = String::try_from(key).map_err(|_| StoreError::Corrupt)?;
        record.insert(key, value).map_err(|_| StoreError::Corrupt)?;
        self.write_slot(slot, sequence, &record)
    }
}
