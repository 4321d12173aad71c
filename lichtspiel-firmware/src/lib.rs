// Library-Root: Hardware-Treiber und Tasks der Firmware
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// ============================================================================
// Testing
// ============================================================================
//
// Diese Crate kompiliert nur für riscv32imac-unknown-none-elf und hat
// deshalb keine eigenen Tests. Die gesamte Spiel-Logik liegt in
// lichtspiel-core und wird in lichtspiel-tests gegen Mocks der Traits
// getestet; hier bleiben nur die dünnen Treiber in `hal`.
