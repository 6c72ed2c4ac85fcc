//! Live display of the generation script's output

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use knobpanel_application::ports::script_runner::{LogSink, OutputStream};
use std::sync::Mutex;
use std::time::Duration;

/// Streams child output to the terminal as it arrives, with an optional
/// spinner kept below the output.
pub struct ConsoleLogSink {
    spinner: Mutex<Option<ProgressBar>>,
    show_spinner: bool,
}

impl ConsoleLogSink {
    pub fn new(show_spinner: bool) -> Self {
        Self {
            spinner: Mutex::new(None),
            show_spinner,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn print(stream: OutputStream, line: &str) {
        match stream {
            OutputStream::Stdout => println!("{}", line),
            OutputStream::Stderr => eprintln!("{}", line),
        }
    }
}

impl Default for ConsoleLogSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LogSink for ConsoleLogSink {
    fn on_start(&self, command: &str) {
        println!("{} {}", "->".cyan(), command.bold());
        if !self.show_spinner {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("running");
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_line(&self, stream: OutputStream, line: &str) {
        match self.spinner.lock().ok().as_ref().and_then(|s| s.as_ref()) {
            Some(pb) => pb.suspend(|| Self::print(stream, line)),
            None => Self::print(stream, line),
        }
    }

    fn on_finish(&self, _success: bool, _exit_code: i32, _message: &str) {
        if let Some(pb) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_without_spinner() {
        let sink = ConsoleLogSink::new(false);
        sink.on_start("python -u generate.py");
        sink.on_line(OutputStream::Stdout, "hello");
        sink.on_finish(true, 0, "generate.py finished successfully");
        assert!(sink.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_spinner_cleared_on_finish() {
        let sink = ConsoleLogSink::new(true);
        sink.on_start("python -u generate.py");
        assert!(sink.spinner.lock().unwrap().is_some());
        sink.on_line(OutputStream::Stderr, "warning: slow");
        sink.on_finish(false, 2, "generate.py exited with code 2");
        assert!(sink.spinner.lock().unwrap().is_none());
    }
}
