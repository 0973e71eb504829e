use std::fmt;
use std::path::PathBuf;

/// Where the game process lives: an interpreter plus the script it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProcessConfig {
    pub interpreter: String,
    pub script_path: PathBuf,
}

impl GameProcessConfig {
    pub fn new(interpreter: impl Into<String>, script_path: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            script_path: script_path.into(),
        }
    }
}

/// Argument list for one game process invocation.
///
/// Tokens are ordered: program, script path, then flags. A flag that takes a
/// value is always immediately followed by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<String>,
}

impl Command {
    pub fn new(config: &GameProcessConfig) -> Self {
        Self {
            tokens: vec![
                config.interpreter.clone(),
                config.script_path.display().to_string(),
            ],
        }
    }

    /// Append a bare flag such as `-delete_game`.
    pub fn flag(mut self, flag: &str) -> Self {
        self.tokens.push(flag.to_string());
        self
    }

    /// Append a flag and its value as adjacent tokens.
    pub fn arg(mut self, flag: &str, value: impl Into<String>) -> Self {
        self.tokens.push(flag.to_string());
        self.tokens.push(value.into());
        self
    }

    /// Append a flag/value pair only when the value is present and non-empty.
    pub fn opt_arg(self, flag: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.arg(flag, v),
            _ => self,
        }
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Everything after the program: script path and flags.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
