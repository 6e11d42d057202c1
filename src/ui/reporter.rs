// Status reporting for the batch run and tool provisioning

use colored::Colorize;
use std::cell::RefCell;
use std::io::Write;

/// Sink for user-facing status lines.
///
/// The batch runner and the provisioner only talk to the user through this
/// trait, so the same flow can print colored output to a terminal or plain
/// lines to any writer.
pub trait StatusReporter {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes colored lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ColoredReporter;

impl StatusReporter for ColoredReporter {
    fn info(&self, message: &str) {
        println!("{}", message.cyan());
    }

    fn success(&self, message: &str) {
        println!("{}", message.green().bold());
    }

    fn error(&self, message: &str) {
        println!("{}", message.red().bold());
    }
}

/// Writes uncolored, tagged lines to any writer.
///
/// Write failures are ignored: losing a status line must not abort a download.
pub struct PlainReporter<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> PlainReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, tag: &str, message: &str) {
        let _ = writeln!(self.out.borrow_mut(), "[{}] {}", tag, message);
    }
}

impl<W: Write> StatusReporter for PlainReporter<W> {
    fn info(&self, message: &str) {
        self.line("info", message);
    }

    fn success(&self, message: &str) {
        self.line("ok", message);
    }

    fn error(&self, message: &str) {
        self.line("error", message);
    }
}

impl PlainReporter<Vec<u8>> {
    /// Captured output as text
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out.borrow()).into_owned()
    }
}
