pub mod command;
pub mod config;
pub mod contact;
pub mod draw;
pub mod nav;
pub mod particle;
pub mod settings;
pub mod sim;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub use wasm::*;

pub use settings::Settings;
pub use sim::Sim;
