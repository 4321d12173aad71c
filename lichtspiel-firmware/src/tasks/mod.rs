// Task-Modul: Enthält alle Embassy Tasks
//
// Das Spiel läuft komplett in einem Task; die Tick-Schleife gibt
// zwischen zwei Durchläufen an den Executor ab.

pub mod game;

// Re-export Tasks für einfachen Import
pub use game::{GameHardware, game_loop, game_task};
