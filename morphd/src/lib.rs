//! # Morph Host Runtime
//!
//! Drives a design environment from an interaction script.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The core never prints or touches the filesystem
//! - **Input is explicit events**: One scripted action per tick
//! - **Deterministic replay is first-class**: Same script, same design
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Builds the environment from configuration or a saved design
//! - Replays pointer actions tick by tick
//! - Executes host commands (rename, save, load, show)
//! - Renders a plain-text summary of the design

pub mod commands;
pub mod interaction_script;
pub mod runtime;

pub use commands::{HostCommand, HostCommandError, HostCommandParser};
pub use interaction_script::{InputScriptError, InteractionScript, PointerAction, ScriptedAction};
pub use runtime::{HostRuntime, HostRuntimeConfig, HostRuntimeError};
