//! Help-text sources for the classify and validate phases.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::FlagError;

/// Produces the target program's rendered help text.
pub trait HelpTextRenderer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FlagError::Help`] when the text cannot be produced.
    fn render(&self) -> Result<String, FlagError>;
}

/// Fixed help text.
#[derive(Debug, Clone, Default)]
pub struct StaticHelpText(pub String);

impl StaticHelpText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl HelpTextRenderer for StaticHelpText {
    fn render(&self) -> Result<String, FlagError> {
        Ok(self.0.clone())
    }
}

/// Runs a program and captures stdout followed by stderr.
///
/// Exit status is ignored: many CLIs exit non-zero after printing usage.
#[derive(Debug, Clone)]
pub struct CommandHelpRenderer {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandHelpRenderer {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Build from a `[program, args...]` vector. `None` when empty.
    #[must_use]
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned()))
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl HelpTextRenderer for CommandHelpRenderer {
    fn render(&self) -> Result<String, FlagError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        let output = cmd
            .output()
            .map_err(|e| FlagError::Help(format!("running {}: {e}", self.program)))?;
        debug!(program = %self.program, status = %output.status, "help command finished");
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}
