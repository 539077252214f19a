pub mod collision;
pub mod config;
pub mod controls;
pub mod driver;
pub mod error;
pub mod params;
pub mod scene;
pub mod system;
pub mod torus;

pub use driver::{Clock, Display, Driver};
pub use params::{Effect, Knob, Params};
pub use system::{CentralBody, Particle, Phase, System, Tick};
