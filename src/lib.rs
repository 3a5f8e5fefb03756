//! A side-scrolling Flappy Bird for the terminal.
//!
//! The simulation ([`world`], [`sim`]) is deterministic given a seeded RNG
//! and knows nothing about terminals, sound or wall-clock time. The front end
//! ([`driver`], [`input`], [`render`], [`audio`], [`app`]) feeds it one flap
//! sample per fixed tick and draws the result.

pub mod app;
pub mod audio;
pub mod config;
pub mod driver;
pub mod geom;
pub mod input;
pub mod render;
pub mod sim;
pub mod timestep;
pub mod world;

pub use sim::{Crash, StepReport, step};
pub use world::{Bird, Phase, Pipe, WorldState};
