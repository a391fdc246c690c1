//! Input handling for the DriveBox demo
//!
//! This crate turns winit keyboard and mouse events into driving forces
//! and orbit camera motion.

mod drive_controller;
mod orbit_controller;

pub use drive_controller::{DriveController, TurnDirection};
pub use orbit_controller::{OrbitControl, OrbitController};
