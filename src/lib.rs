//! DriveBox - drivable box physics demo
//!
//! A small driving sandbox: a dynamic box car on a ground plane, steered
//! with the keyboard, watched through an orbiting camera. This crate wires
//! the engine crates together into the application.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
