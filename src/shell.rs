//! Shell - command dispatch, history, and autocomplete
//!
//! Pure logic with no DOM dependency. The command table is injected at
//! construction; there is no process-wide registry. The terminal talks to
//! the shell only through `run_command`, `browse_history`, and
//! `auto_complete`.

/// A command handler. Receives the whitespace-split arguments and returns
/// an HTML fragment to append to the scrollback, or `None` for no output.
pub type CommandFn = Box<dyn Fn(&[&str]) -> Option<String>>;

/// Insertion-ordered command table.
///
/// Autocomplete reports matches in registration order, so this is a vector
/// rather than a map. Names are unique; re-registering replaces the handler.
#[derive(Default)]
pub struct Commands {
    entries: Vec<(String, CommandFn)>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, func: CommandFn) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = func;
        } else {
            self.entries.push((name.to_string(), func));
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandFn> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Direction for history browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the oldest entry (Up arrow)
    Older,
    /// Towards the newest entry (Down arrow)
    Newer,
}

/// Result of a successful history move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browse<'a> {
    /// Landed on a recorded history entry
    Entry(&'a str),
    /// Moved past the newest entry, back to the in-progress line
    Live,
}

/// Shell state: command table, history, prompt.
pub struct Shell {
    commands: Commands,
    history: Vec<String>,
    /// Position for up/down recall. `history.len()` denotes the live
    /// (not yet submitted) line. Invariant: 0 <= index <= history.len().
    history_index: usize,
    prompt: String,
    welcome: String,
}

impl Shell {
    pub fn new(commands: Commands, prompt: &str, welcome: &str) -> Self {
        Self {
            commands,
            history: Vec::new(),
            history_index: 0,
            prompt: prompt.to_string(),
            welcome: welcome.to_string(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }

    /// Run a command line. Non-empty lines are recorded in history before
    /// dispatch, whether or not the command is recognized. Returns the
    /// HTML fragment to render, or `None` for an empty line or a command
    /// that produced no output.
    pub fn run_command(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.history.push(text.to_string());
        self.history_index = self.history.len();

        let mut parts = text.split_whitespace();
        let cmd = parts.next()?;
        let args: Vec<&str> = parts.collect();

        match self.commands.get(cmd) {
            Some(func) => func(&args),
            None => Some(format!("<p>command not found: {}</p>", cmd)),
        }
    }

    /// Move within the history. Both directions move first, then read, so
    /// the entry returned is always the one now pointed to. Stepping past
    /// the newest entry yields `Browse::Live`: the caller should restore
    /// whatever line was in progress. `None` means no movement was
    /// possible and the edit buffer must not change.
    pub fn browse_history(&mut self, direction: Direction) -> Option<Browse<'_>> {
        match direction {
            Direction::Older => {
                if self.history_index == 0 {
                    return None;
                }
                self.history_index -= 1;
                Some(Browse::Entry(&self.history[self.history_index]))
            }
            Direction::Newer => {
                if self.history_index >= self.history.len() {
                    return None;
                }
                self.history_index += 1;
                match self.history.get(self.history_index) {
                    Some(entry) => Some(Browse::Entry(entry)),
                    None => Some(Browse::Live),
                }
            }
        }
    }

    /// Case-insensitive prefix match against registered command names, in
    /// registration order. An empty prefix matches every command.
    pub fn auto_complete(&self, partial: &str) -> Vec<&str> {
        let needle = partial.to_ascii_lowercase();
        self.commands
            .names()
            .filter(|name| name.to_ascii_lowercase().starts_with(&needle))
            .collect()
    }
}
