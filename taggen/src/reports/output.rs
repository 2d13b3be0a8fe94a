//! Output trait for rendering reports.

/// Where reports are rendered.
///
/// Reports call these by meaning (a section, an added file, a warning) and
/// leave the formatting to the implementation.
pub trait Output {
    /// A heading for the lines that follow.
    fn section(&mut self, name: &str);
    fn key_value(&mut self, key: &str, value: &str);
    fn list_item(&mut self, text: &str);
    /// A file that was written.
    fn added_item(&mut self, text: &str);
    fn warning(&mut self, msg: &str);
    /// A labelled rule, e.g. above previewed file contents.
    fn divider(&mut self, label: &str);
    /// Text printed as-is.
    fn preformatted(&mut self, text: &str);
    fn newline(&mut self);
}

pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Prints to the terminal. Warnings go to stderr; with `quiet` set nothing
/// else is printed.
pub struct TerminalOutput {
    quiet: bool,
}

impl TerminalOutput {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn print(&self, text: std::fmt::Arguments) {
        if !self.quiet {
            println!("{}", text);
        }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        self.print(format_args!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.print(format_args!("{}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.print(format_args!("  - {}", text));
    }

    fn added_item(&mut self, text: &str) {
        self.print(format_args!("  + {}", text));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn divider(&mut self, label: &str) {
        self.print(format_args!("── {} ──", label));
    }

    fn preformatted(&mut self, text: &str) {
        self.print(format_args!("{}", text));
    }

    fn newline(&mut self) {
        self.print(format_args!(""));
    }
}

/// Collects rendered lines, for asserting on report output.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn section(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("  - {}", text));
    }

    fn added_item(&mut self, text: &str) {
        self.lines.push(format!("  + {}", text));
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("── {} ──", label));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
