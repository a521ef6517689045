//! Conflict resolution for occupied link targets.
//!
//! The link engine calls a [`ConflictPolicy`] whenever a target is occupied
//! by something other than the intended link. The policy decides whether to
//! skip the link, clobber the target, or abort the whole run. The engine loop
//! is the same whichever policy is plugged in.
use std::io::{BufRead, Write};

use crate::error::LinkError;
use crate::resources::{LinkSpec, TargetState};

/// An occupied target awaiting a decision.
#[derive(Debug, Clone, Copy)]
pub struct Conflict<'a> {
    /// The link that could not be created as-is.
    pub spec: &'a LinkSpec,
    /// What currently occupies the target.
    pub state: &'a TargetState,
}

impl Conflict<'_> {
    /// Convert the conflict into the matching typed error.
    #[must_use]
    pub fn to_error(&self) -> LinkError {
        match self.state {
            TargetState::WrongLink { current } => LinkError::TargetWrongLink {
                target: self.spec.target.clone(),
                current: current.clone(),
            },
            TargetState::Occupied { kind } => LinkError::TargetOccupied {
                target: self.spec.target.clone(),
                kind: kind.to_string(),
            },
            other => LinkError::TargetOccupied {
                target: self.spec.target.clone(),
                kind: other.describe(),
            },
        }
    }
}

/// Decision for a single conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the target alone and continue with the next link.
    Skip,
    /// Replace the target with the intended link.
    Clobber,
    /// Stop the entire run.
    Abort,
}

/// Strategy invoked by the link engine for each conflict.
pub trait ConflictPolicy {
    /// Decide what to do about `conflict`.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy cannot communicate with the operator
    /// (e.g. the prompt cannot be written).
    fn resolve(&mut self, conflict: &Conflict<'_>) -> Result<Resolution, LinkError>;
}

/// Policy for runs without an operator: every conflict aborts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl ConflictPolicy for NonInteractive {
    fn resolve(&mut self, _conflict: &Conflict<'_>) -> Result<Resolution, LinkError> {
        Ok(Resolution::Abort)
    }
}

/// Policy that always replaces the occupied target.
#[derive(Debug, Default, Clone, Copy)]
pub struct Clobber;

impl ConflictPolicy for Clobber {
    fn resolve(&mut self, _conflict: &Conflict<'_>) -> Result<Resolution, LinkError> {
        Ok(Resolution::Clobber)
    }
}

/// Line-oriented prompt on an input/output pair.
///
/// Recognised answers are `y` (clobber), `n` (skip) and `a` (abort).
/// Anything else re-prompts. End of input is treated as abort.
#[derive(Debug)]
pub struct Interactive<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interactive<R, W> {
    /// Create a prompt reading answers from `input` and writing to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the policy, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, conflict: &Conflict<'_>) -> Result<(), LinkError> {
        let spec = conflict.spec;
        write!(
            self.output,
            "{} is {}, expected a link to {}\nclobber? [y]es, [n]o (skip), [a]bort: ",
            spec.target.display(),
            conflict.state.describe(),
            spec.source.display(),
        )
        .and_then(|()| self.output.flush())
        .map_err(|e| LinkError::io("write prompt", &spec.target, e))
    }

    /// Read one answer line. `Ok(None)` means the input stream closed.
    fn read_answer(&mut self) -> Result<Option<String>, LinkError> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line)),
            Err(e) => Err(LinkError::io("read answer", "<stdin>", e)),
        }
    }
}

impl<R: BufRead, W: Write> ConflictPolicy for Interactive<R, W> {
    fn resolve(&mut self, conflict: &Conflict<'_>) -> Result<Resolution, LinkError> {
        loop {
            self.prompt(conflict)?;
            let Some(answer) = self.read_answer()? else {
                tracing::warn!("{}", LinkError::InputClosed);
                return Ok(Resolution::Abort);
            };
            match parse_answer(&answer) {
                Some(resolution) => return Ok(resolution),
                None => {
                    writeln!(self.output, "unrecognised answer '{}'", answer.trim())
                        .map_err(|e| LinkError::io("write prompt", &conflict.spec.target, e))?;
                }
            }
        }
    }
}

/// Parse a single answer line. Matching is case-sensitive.
fn parse_answer(line: &str) -> Option<Resolution> {
    match line.trim() {
        "y" => Some(Resolution::Clobber),
        "n" => Some(Resolution::Skip),
        "a" => Some(Resolution::Abort),
        _ => None,
    }
}
