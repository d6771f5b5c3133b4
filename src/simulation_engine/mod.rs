// simulation_engine/mod.rs
pub mod movement;
pub mod simulation;
pub mod vehicles;
