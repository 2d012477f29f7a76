//! Deathstar Run game library
//!
//! A two-level arcade shooter: clear an asteroid field with a limited magazine,
//! then bring down the DeathStar before the clock runs out.  All rules live in
//! [`session::Session`]; the Bevy plugins in [`simulation`] and [`rendering`]
//! drive it and draw it.

pub mod asteroid;
pub mod boss;
pub mod bullet;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod input;
pub mod rendering;
pub mod session;
pub mod ship;
pub mod simulation;
pub mod sprite;
