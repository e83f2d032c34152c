//! Terminal - the input-event state machine
//!
//! Owns the edit buffer and the scrollback transcript, and delegates
//! command semantics to the shell. Pure: no DOM access, so the whole
//! keystroke contract is testable natively. The browser wiring in
//! `dom.rs` feeds parsed `Key` events in and renders the resulting state
//! out.
//!
//! The edit buffer has exactly two states: editing (keys mutate
//! buffer/cursor) and submitted (line flushed to scrollback, buffer
//! reset). Commands are synchronous, so there is no busy state.

use crate::editor::{LineBuffer, LineView};
use crate::shell::{Browse, Direction, Shell};

/// A keystroke the terminal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map DOM `KeyboardEvent.key` / `.code` values to a `Key`.
    /// Returns `None` for keys the terminal does not handle; the caller
    /// must then leave the event's default action alone.
    pub fn parse(key: &str, code: &str) -> Option<Key> {
        match code {
            "Enter" | "NumpadEnter" => return Some(Key::Enter),
            "Backspace" => return Some(Key::Backspace),
            "Tab" => return Some(Key::Tab),
            "ArrowLeft" => return Some(Key::Left),
            "ArrowRight" => return Some(Key::Right),
            "ArrowUp" => return Some(Key::Up),
            "ArrowDown" => return Some(Key::Down),
            _ => {}
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_control() => Some(Key::Char(ch)),
            _ => None,
        }
    }
}

/// Terminal state: edit buffer, scrollback, shell.
pub struct Terminal {
    shell: Shell,
    line: LineBuffer,
    /// Rendered transcript: HTML fragments in append order
    scrollback: Vec<String>,
    /// How much of the scrollback the renderer has already consumed
    flushed: usize,
    /// In-progress line saved while browsing history; `None` while on the
    /// live line
    draft: Option<String>,
}

impl Terminal {
    pub fn new(shell: Shell) -> Self {
        let mut term = Self {
            shell,
            line: LineBuffer::new(),
            scrollback: Vec::new(),
            flushed: 0,
            draft: None,
        };
        if !term.shell.welcome().is_empty() {
            let welcome = term.shell.welcome().to_string();
            term.scrollback.push(welcome);
        }
        term
    }

    /// Apply one keystroke. Every `Key` is consumed; the caller suppresses
    /// the browser's default action for parsed keys.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char(ch) => self.line.insert(ch),
            Key::Backspace => self.line.backspace(),
            Key::Left => self.line.move_left(),
            Key::Right => self.line.move_right(),
            Key::Tab => self.complete(),
            Key::Enter => self.submit(),
            Key::Up => self.browse(Direction::Older),
            Key::Down => self.browse(Direction::Newer),
        }
    }

    /// Tab: complete the whitespace-stripped buffer. Only an unambiguous
    /// match (exactly one suggestion) replaces the line; zero or several
    /// suggestions leave it untouched.
    fn complete(&mut self) {
        let needle: String = self
            .line
            .text()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let suggestions = self.shell.auto_complete(&needle);
        if let [only] = suggestions.as_slice() {
            let completion = only.to_string();
            self.line.set_text(&completion);
        }
    }

    /// Enter: run the trimmed line, echo prompt + raw line into the
    /// scrollback, then the command output (if any). The buffer is always
    /// reset, whatever the command did.
    fn submit(&mut self) {
        let input = self.line.take();
        self.draft = None;

        let output = self.shell.run_command(input.trim());
        self.scrollback.push(format!(
            "<span>{}</span><span>&nbsp;{}</span><br>",
            self.shell.prompt(),
            input
        ));
        if let Some(fragment) = output {
            self.scrollback.push(fragment);
        }
    }

    /// Up/Down: recall from history. The live line is saved on the first
    /// step into history and restored when browsing walks back past the
    /// newest entry. When the shell reports no movement, the buffer stays
    /// as it is.
    fn browse(&mut self, direction: Direction) {
        let moved = match self.shell.browse_history(direction) {
            Some(Browse::Entry(entry)) => Some(Some(entry.to_string())),
            Some(Browse::Live) => Some(None),
            None => None,
        };

        match moved {
            Some(Some(entry)) => {
                if self.draft.is_none() {
                    self.draft = Some(self.line.text().to_string());
                }
                self.line.set_text(&entry);
            }
            Some(None) => {
                let draft = self.draft.take().unwrap_or_default();
                self.line.set_text(&draft);
            }
            None => {}
        }
    }

    pub fn prompt(&self) -> &str {
        self.shell.prompt()
    }

    /// The visible line, recomputed from buffer + cursor on every call.
    pub fn line_view(&self) -> LineView<'_> {
        self.line.view()
    }

    /// Full transcript, oldest first.
    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    /// Fragments appended since the last drain. The renderer appends
    /// these to the scrollback region and scrolls to the bottom.
    pub fn drain_scrollback(&mut self) -> &[String] {
        let start = self.flushed;
        self.flushed = self.scrollback.len();
        &self.scrollback[start..]
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    #[cfg(test)]
    fn buffer(&self) -> &str {
        self.line.text()
    }

    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.line.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::Commands;

    fn test_terminal() -> Terminal {
        let mut commands = Commands::new();
        commands.register("hello", Box::new(|_| Some("<p>hi</p>".to_string())));
        commands.register("help", Box::new(|_| Some("<p>no help here</p>".to_string())));
        commands.register("quiet", Box::new(|_| None));
        Terminal::new(Shell::new(commands, "$", ""))
    }

    fn type_text(term: &mut Terminal, text: &str) {
        for ch in text.chars() {
            term.handle_key(Key::Char(ch));
        }
    }

    #[test]
    fn test_typing_fills_buffer() {
        let mut term = test_terminal();
        type_text(&mut term, "abc");
        assert_eq!(term.buffer(), "abc");
        assert_eq!(term.cursor(), 3);
    }

    #[test]
    fn test_submit_echoes_and_renders_output() {
        let mut term = test_terminal();
        type_text(&mut term, "hello");
        term.handle_key(Key::Enter);

        assert_eq!(
            term.scrollback(),
            &[
                "<span>$</span><span>&nbsp;hello</span><br>".to_string(),
                "<p>hi</p>".to_string(),
            ]
        );
        assert_eq!(term.buffer(), "");
        assert_eq!(term.cursor(), 0);
    }

    #[test]
    fn test_submit_empty_line_echoes_only() {
        let mut term = test_terminal();
        term.handle_key(Key::Enter);
        assert_eq!(
            term.scrollback(),
            &["<span>$</span><span>&nbsp;</span><br>".to_string()]
        );
    }

    #[test]
    fn test_submit_whitespace_only_produces_no_output() {
        let mut term = test_terminal();
        type_text(&mut term, "   ");
        term.handle_key(Key::Enter);
        // Echo line preserves the raw buffer; nothing else is rendered
        assert_eq!(term.scrollback().len(), 1);
        assert_eq!(term.buffer(), "");
        assert!(term.shell().history().is_empty());
    }

    #[test]
    fn test_submit_silent_command_echoes_only() {
        let mut term = test_terminal();
        type_text(&mut term, "quiet");
        term.handle_key(Key::Enter);
        assert_eq!(term.scrollback().len(), 1);
    }

    #[test]
    fn test_unknown_command_renders_error() {
        let mut term = test_terminal();
        type_text(&mut term, "bogus");
        term.handle_key(Key::Enter);
        assert_eq!(
            term.scrollback().last().unwrap(),
            "<p>command not found: bogus</p>"
        );
    }

    #[test]
    fn test_drain_scrollback_is_incremental() {
        let mut term = test_terminal();
        type_text(&mut term, "hello");
        term.handle_key(Key::Enter);
        assert_eq!(term.drain_scrollback().len(), 2);
        assert!(term.drain_scrollback().is_empty());

        type_text(&mut term, "quiet");
        term.handle_key(Key::Enter);
        assert_eq!(term.drain_scrollback().len(), 1);
    }

    #[test]
    fn test_tab_completes_single_match() {
        let mut term = test_terminal();
        type_text(&mut term, "q");
        term.handle_key(Key::Tab);
        assert_eq!(term.buffer(), "quiet");
        assert_eq!(term.cursor(), 5);
    }

    #[test]
    fn test_tab_ambiguous_leaves_buffer() {
        let mut term = test_terminal();
        type_text(&mut term, "hel");
        term.handle_key(Key::Tab);
        assert_eq!(term.buffer(), "hel");
        assert_eq!(term.cursor(), 3);
    }

    #[test]
    fn test_tab_no_match_leaves_buffer() {
        let mut term = test_terminal();
        type_text(&mut term, "xyz");
        term.handle_key(Key::Tab);
        assert_eq!(term.buffer(), "xyz");
    }

    #[test]
    fn test_tab_strips_whitespace_before_matching() {
        let mut term = test_terminal();
        type_text(&mut term, "  q  ");
        term.handle_key(Key::Tab);
        assert_eq!(term.buffer(), "quiet");
    }

    #[test]
    fn test_tab_completes_non_ascii_name() {
        let mut commands = Commands::new();
        commands.register("héllo", Box::new(|_| Some("<p>salut</p>".to_string())));
        let mut term = Terminal::new(Shell::new(commands, "$", ""));

        term.handle_key(Key::Char('h'));
        term.handle_key(Key::Tab);
        assert_eq!(term.buffer(), "héllo");

        // Walk back over the multi-byte char and split the view there
        for _ in 0..4 {
            term.handle_key(Key::Left);
        }
        let view = term.line_view();
        assert_eq!(view.left, "h");
        assert_eq!(view.cursor, Some('é'));
        assert_eq!(view.right, "llo");

        term.handle_key(Key::Backspace);
        assert_eq!(term.buffer(), "éllo");
    }

    #[test]
    fn test_history_recall_and_draft_restore() {
        let mut term = test_terminal();
        type_text(&mut term, "hello");
        term.handle_key(Key::Enter);
        type_text(&mut term, "quiet");
        term.handle_key(Key::Enter);

        // Start typing a new line, then browse away and back
        type_text(&mut term, "dra");
        term.handle_key(Key::Up);
        assert_eq!(term.buffer(), "quiet");
        term.handle_key(Key::Up);
        assert_eq!(term.buffer(), "hello");
        // At the oldest entry: no further movement
        term.handle_key(Key::Up);
        assert_eq!(term.buffer(), "hello");

        term.handle_key(Key::Down);
        assert_eq!(term.buffer(), "quiet");
        term.handle_key(Key::Down);
        assert_eq!(term.buffer(), "dra");
        // On the live line: no further movement
        term.handle_key(Key::Down);
        assert_eq!(term.buffer(), "dra");
    }

    #[test]
    fn test_history_down_with_empty_history_is_noop() {
        let mut term = test_terminal();
        type_text(&mut term, "abc");
        term.handle_key(Key::Down);
        assert_eq!(term.buffer(), "abc");
        term.handle_key(Key::Up);
        assert_eq!(term.buffer(), "abc");
    }

    #[test]
    fn test_recalled_entry_can_be_resubmitted() {
        let mut term = test_terminal();
        type_text(&mut term, "hello");
        term.handle_key(Key::Enter);
        term.handle_key(Key::Up);
        term.handle_key(Key::Enter);

        assert_eq!(term.scrollback().len(), 4);
        assert_eq!(term.scrollback().last().unwrap(), "<p>hi</p>");
        assert_eq!(term.shell().history().len(), 2);
    }

    #[test]
    fn test_welcome_message_in_scrollback() {
        let commands = Commands::new();
        let term = Terminal::new(Shell::new(commands, "$", "<p>welcome</p>"));
        assert_eq!(term.scrollback(), &["<p>welcome</p>".to_string()]);
    }

    #[test]
    fn test_key_parse_special_keys() {
        assert_eq!(Key::parse("Enter", "Enter"), Some(Key::Enter));
        assert_eq!(Key::parse("Enter", "NumpadEnter"), Some(Key::Enter));
        assert_eq!(Key::parse("Backspace", "Backspace"), Some(Key::Backspace));
        assert_eq!(Key::parse("Tab", "Tab"), Some(Key::Tab));
        assert_eq!(Key::parse("ArrowLeft", "ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::parse("ArrowUp", "ArrowUp"), Some(Key::Up));
    }

    #[test]
    fn test_key_parse_printable() {
        assert_eq!(Key::parse("a", "KeyA"), Some(Key::Char('a')));
        assert_eq!(Key::parse(" ", "Space"), Some(Key::Char(' ')));
        assert_eq!(Key::parse("$", "Digit4"), Some(Key::Char('$')));
    }

    #[test]
    fn test_key_parse_unhandled() {
        assert_eq!(Key::parse("Shift", "ShiftLeft"), None);
        assert_eq!(Key::parse("F1", "F1"), None);
        assert_eq!(Key::parse("Escape", "Escape"), None);
    }
}
