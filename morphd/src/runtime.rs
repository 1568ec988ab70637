//! # Host Runtime
//!
//! Replays an interaction script against a design environment, one tick per
//! pointer action.

use crate::commands::{HostCommand, HostCommandParser};
use crate::interaction_script::{InteractionScript, PointerAction, ScriptedAction};
use morph_core::{
    ConfigError, DesignEnvironment, EditorConfig, GridError, InteractionTarget, Mutation,
    TickInput, ToolState,
};
use morph_store::{DesignStore, LoadError, SaveError};
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Grid error: {0}")]
    GridError(#[from] GridError),

    #[error("Load error: {0}")]
    LoadError(#[from] LoadError),

    #[error("Save error: {0}")]
    SaveError(#[from] SaveError),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("Command error: {0}")]
    CommandError(String),
}

/// Host runtime configuration
#[derive(Debug, Clone, Default)]
pub struct HostRuntimeConfig {
    /// Grid size and initial tool
    pub editor: EditorConfig,
    /// Optional interaction script
    pub script: Option<String>,
    /// Design to load before replaying
    pub load: Option<PathBuf>,
    /// Maximum ticks to run (0 = unlimited)
    pub max_ticks: usize,
}

/// Host runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostState {
    Running,
    Shutdown,
}

/// Host runtime
pub struct HostRuntime {
    config: HostRuntimeConfig,
    env: DesignEnvironment,
    script: Option<InteractionScript>,
    /// Tool applied on the next tick
    tool: ToolState,
    /// Selection is sticky between ticks until replaced or cleared
    selection: Option<InteractionTarget>,
    state: HostState,
    ticks: usize,
    /// Events the environment refused (invalid targets)
    rejected: usize,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        config.editor.validate()?;
        let mut env = DesignEnvironment::new(&config.editor)?;

        if let Some(path) = &config.load {
            env.replace_state(DesignStore::load(path)?);
        }

        let script = config
            .script
            .as_deref()
            .map(InteractionScript::from_text)
            .transpose()
            .map_err(|e| HostRuntimeError::ScriptError(e.to_string()))?;

        Ok(Self {
            tool: env.tool(),
            config,
            env,
            script,
            selection: None,
            state: HostState::Running,
            ticks: 0,
            rejected: 0,
        })
    }

    /// Runs the script to completion
    ///
    /// Returns when:
    /// - The script is exhausted
    /// - Max ticks reached (if configured)
    /// - `:quit` was replayed
    pub fn run(&mut self) {
        loop {
            if self.state == HostState::Shutdown {
                break;
            }

            if self.config.max_ticks > 0 && self.ticks >= self.config.max_ticks {
                log::info!("Stopping after {} ticks", self.ticks);
                break;
            }

            let Some(action) = self.script.as_mut().and_then(InteractionScript::next_action)
            else {
                break;
            };

            self.step(action);
        }

        print!("{}", self.render_summary());
    }

    /// Replays one scripted action
    ///
    /// Rejected pointer events and failed commands are logged; replay goes on.
    pub fn step(&mut self, action: ScriptedAction) {
        match action {
            ScriptedAction::Mode(mode) => self.tool.mode = mode,
            ScriptedAction::Selector(kind) => self.tool.selector = kind,
            ScriptedAction::Pointer { action, target } => {
                self.pointer(action, target);
                self.ticks += 1;
            }
            ScriptedAction::Command(command) => {
                if let Err(err) = self.run_command(command) {
                    log::warn!("Command failed: {}", err);
                }
            }
        }
    }

    /// Builds the tick input for a pointer action and ticks once
    fn pointer(&mut self, action: PointerAction, target: Option<InteractionTarget>) {
        let mut input = TickInput::new(self.tool);
        let mut selection = self.selection;

        match action {
            PointerAction::Hover => input.hovered = target,
            PointerAction::Press => {
                input = input.pressed();
                input.hovered = target;
                selection = target;
            }
            PointerAction::Drag => {
                input = input.held();
                input.hovered = target;
            }
            PointerAction::Select => selection = target,
            PointerAction::Idle => {}
        }

        match self.env.tick(&input.selecting(selection)) {
            Ok(outcome) => {
                self.selection = selection;
                if let Some(mutation) = outcome.mutation {
                    log_mutation(&mutation);
                }
            }
            Err(err) => {
                self.rejected += 1;
                log::warn!("Rejected {:?} at tick {}: {}", action, self.ticks, err);
            }
        }
    }

    /// Parses and executes a host command
    pub fn execute_command(&mut self, command_text: &str) -> Result<(), HostRuntimeError> {
        let command = HostCommandParser::parse(command_text)
            .map_err(|e| HostRuntimeError::CommandError(e.to_string()))?;
        self.run_command(command)
    }

    fn run_command(&mut self, command: HostCommand) -> Result<(), HostRuntimeError> {
        match command {
            HostCommand::Rename { name } => {
                let Some(id) = self.env.focused_object() else {
                    return Err(HostRuntimeError::CommandError(
                        "no object is hovered or selected".to_string(),
                    ));
                };
                log::info!("Renaming object {} to {}", id, name);
                self.env.rename_object(id, name)?;
            }
            HostCommand::Save { path } => {
                DesignStore::save(&path, self.env.state())?;
            }
            HostCommand::Load { path } => {
                // A failed load leaves the current design untouched
                let state = DesignStore::load(&path)?;
                self.env.replace_state(state);
                self.selection = None;
            }
            HostCommand::Show => {
                print!("{}", self.render_summary());
            }
            HostCommand::Quit => {
                self.state = HostState::Shutdown;
            }
        }

        Ok(())
    }

    /// Renders the design as plain text
    pub fn render_summary(&self) -> String {
        let snapshot = self.env.snapshot();
        let mut output = String::new();

        let _ = writeln!(
            output,
            "grid {}x{}  mode {}  selector {}",
            snapshot.width,
            snapshot.height,
            self.tool.mode.as_str(),
            self.tool.selector
        );
        for row in snapshot.render_rows() {
            let _ = writeln!(output, "  {}", row);
        }

        let _ = writeln!(output, "objects: {}", snapshot.objects.len());
        for (index, object) in snapshot.objects.iter().enumerate() {
            let _ = writeln!(
                output,
                "  #{} {} ({} cells)",
                index,
                object.name,
                object.len()
            );
        }

        let label = |id: Option<morph_core::ObjectId>| match id {
            Some(id) => format!("{} {}", id, snapshot.objects[id.index()].name),
            None => "none".to_string(),
        };
        let _ = writeln!(output, "hovered: {}", label(snapshot.hovered));
        let _ = writeln!(output, "selected: {}", label(snapshot.selected));

        let duplicates = self.env.duplicate_names();
        if !duplicates.is_empty() {
            let names: Vec<String> = duplicates
                .iter()
                .map(|(name, count)| format!("{} ({})", name, count))
                .collect();
            let _ = writeln!(output, "duplicate names: {}", names.join(", "));
        }

        output
    }

    /// Returns the tick count
    pub fn tick_count(&self) -> usize {
        self.ticks
    }

    /// Returns the number of rejected pointer events
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Returns a reference to the environment (for testing)
    pub fn environment(&self) -> &DesignEnvironment {
        &self.env
    }
}

fn log_mutation(mutation: &Mutation) {
    match mutation {
        Mutation::Cell { id, kind, change } => {
            log::info!("cell {} -> {} ({:?})", id, kind, change);
        }
        Mutation::Edge { a, b, enabled } => {
            log::info!(
                "edge {}-{} {}",
                a,
                b,
                if *enabled { "enabled" } else { "disabled" }
            );
        }
    }
}
