//! # Interaction Script Parser
//!
//! A line-based pointer script for deterministic replay of editing sessions.
//!
//! ## Format
//!
//! Each line is one action:
//! - Tool changes (no tick): `mode voxels|edges|select`, `selector <type>`
//! - Pointer ticks: `hover <target>`, `press <target>`, `drag <target>`,
//!   `select <target>`, `idle`
//! - Host commands: `:rename NAME`, `:save PATH`, `:load PATH`, `:show`
//! - Comments: `# ...`, also allowed after an action
//!
//! A target is `cell N`, `edge A B` or `none`.
//!
//! ## Example
//!
//! ```text
//! mode voxels
//! selector rigid
//! drag cell 0          # paint
//! drag cell 1
//! mode select
//! press cell 0
//! :rename Arm
//! ```

use crate::commands::{HostCommand, HostCommandParser};
use morph_core::{CellId, CellType, EditMode, InteractionTarget};
use std::collections::VecDeque;
use thiserror::Error;

/// Interaction script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// What the pointer does during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Move over a target without pressing
    Hover,
    /// Pointer goes down over a target; also selects it
    Press,
    /// Pointer is held while over a target
    Drag,
    /// Select a target (or clear the selection with `none`)
    Select,
    /// Tick with no pointer activity
    Idle,
}

/// A single scripted action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAction {
    Mode(EditMode),
    Selector(CellType),
    Pointer {
        action: PointerAction,
        target: Option<InteractionTarget>,
    },
    Command(HostCommand),
}

impl ScriptedAction {
    /// Whether replaying this action advances the environment one tick
    pub fn ticks(&self) -> bool {
        matches!(self, ScriptedAction::Pointer { .. })
    }
}

/// Interaction script
#[derive(Debug, Clone, Default)]
pub struct InteractionScript {
    actions: VecDeque<ScriptedAction>,
}

impl InteractionScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut actions = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = Self::strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }

            let action = Self::parse_line(line).map_err(|message| InputScriptError::ParseError {
                line: line_num + 1,
                message,
            })?;
            actions.push_back(action);
        }

        if actions.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { actions })
    }

    /// Trailing comments are allowed, except in host commands where `#` may
    /// be part of a name or path
    fn strip_comment(line: &str) -> &str {
        if line.trim_start().starts_with(':') {
            return line;
        }
        match line.find('#') {
            Some(index) => &line[..index],
            None => line,
        }
    }

    fn parse_line(line: &str) -> Result<ScriptedAction, String> {
        if line.starts_with(':') {
            return HostCommandParser::parse(line)
                .map(ScriptedAction::Command)
                .map_err(|e| e.to_string());
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty action".to_string());
        };
        let args: Vec<&str> = words.collect();

        match verb.to_lowercase().as_str() {
            "mode" => {
                let name = Self::single_argument(&args, "mode")?;
                EditMode::from_name(name)
                    .map(ScriptedAction::Mode)
                    .ok_or_else(|| format!("unknown mode: {}", name))
            }
            "selector" => {
                let name = Self::single_argument(&args, "selector")?;
                CellType::from_name(name)
                    .map(ScriptedAction::Selector)
                    .ok_or_else(|| format!("unknown cell type: {}", name))
            }
            "hover" => Self::pointer(PointerAction::Hover, &args),
            "press" => Self::pointer(PointerAction::Press, &args),
            "drag" => Self::pointer(PointerAction::Drag, &args),
            "select" => Self::pointer(PointerAction::Select, &args),
            "idle" => {
                if !args.is_empty() {
                    return Err("idle takes no arguments".to_string());
                }
                Ok(ScriptedAction::Pointer {
                    action: PointerAction::Idle,
                    target: None,
                })
            }
            other => Err(format!("unknown action: {}", other)),
        }
    }

    fn single_argument<'a>(args: &[&'a str], verb: &str) -> Result<&'a str, String> {
        match args {
            [value] => Ok(*value),
            _ => Err(format!("{} takes exactly one argument", verb)),
        }
    }

    fn pointer(action: PointerAction, args: &[&str]) -> Result<ScriptedAction, String> {
        let target = Self::parse_target(args)?;
        Ok(ScriptedAction::Pointer { action, target })
    }

    /// Parses `cell N`, `edge A B` or `none`
    fn parse_target(args: &[&str]) -> Result<Option<InteractionTarget>, String> {
        match args {
            ["none"] => Ok(None),
            ["cell", n] => Ok(Some(InteractionTarget::Cell(Self::parse_cell(n)?))),
            ["edge", a, b] => Ok(Some(InteractionTarget::Edge(
                Self::parse_cell(a)?,
                Self::parse_cell(b)?,
            ))),
            [] => Err("missing target".to_string()),
            _ => Err(format!("invalid target: {}", args.join(" "))),
        }
    }

    fn parse_cell(text: &str) -> Result<CellId, String> {
        text.parse::<usize>()
            .map(CellId::new)
            .map_err(|_| format!("invalid cell id: {}", text))
    }

    /// Returns the next action, if any
    pub fn next_action(&mut self) -> Option<ScriptedAction> {
        self.actions.pop_front()
    }

    /// Returns true if there are more actions
    pub fn has_more(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Returns the number of remaining actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of remaining actions that tick the environment
    pub fn remaining_ticks(&self) -> usize {
        self.actions.iter().filter(|action| action.ticks()).count()
    }
}
