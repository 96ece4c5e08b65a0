//! Theme palette transformation: turns a nested light/dark color token tree into CSS custom
//! properties, a utility-framework color config and typography (prose) variables.

pub mod channels;
pub mod cli;
pub mod color;
pub mod config;
pub mod detect;
pub mod error;
pub mod logging;
pub mod preset;
pub mod preview;
pub mod theme;
pub mod token;
pub mod typography;
pub mod walker;
