//! Integration Tests für den Score-Speicher
//!
//! Testet `ScoreStore` auf dem Flash-Record (RAM-Flash) und auf
//! einem einfachen Key-Value-Speicher.

mod common;

use common::*;
use embedded_storage::nor_flash::ReadNorFlash;
use lichtspiel_core::{FlashRecordStore, KeyValueStore, LoadError, ScoreStore, StoreError};

const BASE: u32 = 0;

fn flash_scores() -> ScoreStore<FlashRecordStore<RamFlash>> {
    ScoreStore::new(FlashRecordStore::new(RamFlash::new(2), BASE))
}

/// Schreibt einen Slot von Hand: Header + beliebige Nutzdaten
fn raw_slot(flash: &mut RamFlash, slot: usize, sequence: u32, payload: &[u8]) {
    let start = slot * RamFlash::SECTOR;
    flash.data[start..start + 2].copy_from_slice(b"LS");
    flash.data[start + 2..start + 6].copy_from_slice(&sequence.to_le_bytes());
    flash.data[start + 6..start + 8].copy_from_slice(&(payload.len() as u16).to_le_bytes());
    flash.data[start + 8..start + 8 + payload.len()].copy_from_slice(payload);
}

// ============================================================================
// Tests: Flash-Record
// ============================================================================

#[test]
fn test_empty_flash_loads_zero() {
    let mut scores = flash_scores();
    assert_eq!(scores.try_load(), Err(LoadError::Missing));
    assert_eq!(scores.load(), 0);
}

#[test]
fn test_save_then_load() {
    let mut scores = flash_scores();
    scores.save(7).unwrap();
    assert_eq!(scores.load(), 7);

    // Neu geöffnet auf demselben Flash
    let flash = scores.into_inner().into_inner();
    let mut reopened = ScoreStore::new(FlashRecordStore::new(flash, BASE));
    assert_eq!(reopened.try_load(), Ok(7));
}

#[test]
fn test_save_then_load_max_score() {
    let mut scores = flash_scores();
    scores.save(u32::MAX).unwrap();
    assert_eq!(scores.try_load(), Ok(u32::MAX));

    let flash = scores.into_inner().into_inner();
    let mut reopened = ScoreStore::new(FlashRecordStore::new(flash, BASE));
    assert_eq!(reopened.try_load(), Ok(u32::MAX));
}

#[test]
fn test_record_is_wins_json() {
    let mut scores = flash_scores();
    scores.save(3).unwrap();
    let flash = scores.into_inner().into_inner();

    let json = br#"{"wins":3}"#;
    assert_eq!(&flash.data[8..8 + json.len()], json);
}

#[test]
fn test_saves_alternate_slots() {
    let mut scores = flash_scores();
    scores.save(1).unwrap();
    scores.save(2).unwrap();
    scores.save(3).unwrap();

    let mut flash = scores.into_inner().into_inner();
    assert_eq!(flash.erase_count, 3);

    let mut header = [0u8; 6];
    flash.read(0, &mut header).unwrap();
    assert_eq!(&header[..2], b"LS");
    assert_eq!(u32::from_le_bytes([header[2], header[3], header[4], header[5]]), 3);

    flash.read(RamFlash::SECTOR as u32, &mut header).unwrap();
    assert_eq!(u32::from_le_bytes([header[2], header[3], header[4], header[5]]), 2);
}

#[test]
fn test_torn_write_keeps_previous_score() {
    let mut store = FlashRecordStore::new(RamFlash::new(2), BASE);
    store.write_int("wins", 4).unwrap();

    let mut flash = store.into_inner();
    flash.tear_next_write_after = Some(12);
    let mut store = FlashRecordStore::new(flash, BASE);

    assert_eq!(store.write_int("wins", 5), Err(StoreError::Io));
    assert_eq!(store.read_int("wins"), Ok(Some(4)));
}

#[test]
fn test_garbage_record_loads_zero() {
    let mut flash = RamFlash::new(2);
    raw_slot(&mut flash, 0, 1, b"{\"wins\":");
    let mut scores = ScoreStore::new(FlashRecordStore::new(flash, BASE));

    assert_eq!(scores.try_load(), Err(LoadError::Malformed));
    assert_eq!(scores.load(), 0);

    // Nächster Save überschreibt den kaputten Record
    scores.save(1).unwrap();
    assert_eq!(scores.load(), 1);
}

#[test]
fn test_negative_score_is_out_of_range() {
    let mut flash = RamFlash::new(2);
    raw_slot(&mut flash, 0, 1, br#"{"wins":-2}"#);
    let mut scores = ScoreStore::new(FlashRecordStore::new(flash, BASE));

    assert_eq!(scores.try_load(), Err(LoadError::OutOfRange(-2)));
    assert_eq!(scores.load(), 0);
}

#[test]
fn test_record_without_wins_is_malformed() {
    let mut flash = RamFlash::new(2);
    raw_slot(&mut flash, 0, 1, br#"{"best":9}"#);
    let mut scores = ScoreStore::new(FlashRecordStore::new(flash, BASE));
    assert_eq!(scores.try_load(), Err(LoadError::Malformed));
}

#[test]
fn test_newest_slot_wins() {
    let mut flash = RamFlash::new(2);
    raw_slot(&mut flash, 0, 8, br#"{"wins":8}"#);
    raw_slot(&mut flash, 1, 7, br#"{"wins":7}"#);
    let mut scores = ScoreStore::new(FlashRecordStore::new(flash, BASE));
    assert_eq!(scores.load(), 8);
}

#[test]
fn test_other_keys_survive_save() {
    let mut store = FlashRecordStore::new(RamFlash::new(2), BASE);
    store.write_int("best", 9).unwrap();

    let mut scores = ScoreStore::new(store);
    scores.save(2).unwrap();

    let mut store = scores.into_inner();
    assert_eq!(store.read_int("best"), Ok(Some(9)));
    assert_eq!(store.read_int("wins"), Ok(Some(2)));
}

#[test]
fn test_reset_skips_redundant_write() {
    let mut scores = flash_scores();
    scores.save(5).unwrap();
    scores.reset().unwrap();
    assert_eq!(scores.load(), 0);

    let erases = {
        let flash = scores.into_inner().into_inner();
        let count = flash.erase_count;
        let mut scores = ScoreStore::new(FlashRecordStore::new(flash, BASE));
        scores.reset().unwrap();
        let flash = scores.into_inner().into_inner();
        (count, flash.erase_count)
    };
    assert_eq!(erases.0, erases.1);
}

#[test]
fn test_reset_on_empty_flash_writes_zero() {
    let mut scores = flash_scores();
    scores.reset().unwrap();
    assert_eq!(scores.try_load(), Ok(0));
}

// ============================================================================
// Tests: Key-Value-Speicher
// ============================================================================

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryStore::default();
    let mut scores = ScoreStore::new(store.clone());

    assert_eq!(scores.try_load(), Err(LoadError::Missing));
    scores.save(11).unwrap();
    assert_eq!(store.stored_score(), Some(11));
    assert_eq!(scores.load(), 11);
}

#[test]
fn test_io_error_is_reported() {
    let mut store = MemoryStore::with_score(4);
    store.fail_reads = Some(StoreError::Io);
    let mut scores = ScoreStore::new(store);

    assert_eq!(scores.try_load(), Err(LoadError::Store(StoreError::Io)));
    assert_eq!(scores.load(), 0);
}

#[test]
fn test_failed_save_is_returned() {
    let store = MemoryStore::with_score(1);
    store.fail_writes.set(true);
    let mut scores = ScoreStore::new(store.clone());

    assert_eq!(scores.save(2), Err(StoreError::Io));
    assert_eq!(store.stored_score(), Some(1));
}
