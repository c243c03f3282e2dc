//! Browser console capture.
//!
//! A `ConsoleRecorder` forwards console calls and uncaught exceptions from a
//! page into a channel. The page's own handler diagnostics are told apart
//! from real errors so a declined slider or select value is not a failure.

use anyhow::{Context, Result};
use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EventConsoleApiCalled, EventExceptionThrown, RemoteObject,
};
use chromiumoxide::Page;
use futures::StreamExt;
use shared::PageDiagnostic;
use std::fmt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warning,
    Error,
    /// Uncaught exception, including wasm panics.
    Exception,
}

impl ConsoleLevel {
    fn of_call(kind: &ConsoleApiCalledType) -> Self {
        match kind {
            ConsoleApiCalledType::Error | ConsoleApiCalledType::Assert => Self::Error,
            ConsoleApiCalledType::Warning => Self::Warning,
            _ => Self::Info,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
            Self::Exception => "exception",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    pub level: ConsoleLevel,
    pub text: String,
}

impl ConsoleEntry {
    fn from_call(event: &EventConsoleApiCalled) -> Self {
        let text = event
            .args
            .iter()
            .filter_map(argument_text)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            level: ConsoleLevel::of_call(&event.r#type),
            text,
        }
    }

    fn from_exception(event: &EventExceptionThrown) -> Self {
        let details = &event.exception_details;
        let text = details
            .exception
            .as_ref()
            .and_then(|exception| exception.description.clone())
            .unwrap_or_else(|| details.text.clone());
        Self {
            level: ConsoleLevel::Exception,
            text,
        }
    }

    pub fn diagnostic(&self) -> Option<PageDiagnostic> {
        PageDiagnostic::parse(&self.text)
    }

    /// An error or exception that is not one of the page's diagnostics.
    pub fn is_unexpected_error(&self) -> bool {
        matches!(self.level, ConsoleLevel::Error | ConsoleLevel::Exception)
            && self.diagnostic().is_none()
    }
}

impl fmt::Display for ConsoleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.tag(), self.text)
    }
}

fn argument_text(arg: &RemoteObject) -> Option<String> {
    match &arg.value {
        Some(serde_json::Value::String(text)) => Some(text.clone()),
        Some(value) => Some(value.to_string()),
        None => arg.description.clone(),
    }
}

pub struct ConsoleRecorder {
    entries: mpsc::UnboundedReceiver<ConsoleEntry>,
    tasks: Vec<JoinHandle<()>>,
}

impl ConsoleRecorder {
    /// Start listening. Attach before navigating to catch startup output.
    pub async fn attach(page: &Page) -> Result<Self> {
        page.enable_runtime()
            .await
            .context("Failed to enable the Runtime domain")?;
        let mut calls = page.event_listener::<EventConsoleApiCalled>().await?;
        let mut exceptions = page.event_listener::<EventExceptionThrown>().await?;

        let (sender, entries) = mpsc::unbounded_channel();
        let call_sender = sender.clone();
        let call_task = tokio::spawn(async move {
            while let Some(event) = calls.next().await {
                if call_sender.send(ConsoleEntry::from_call(&event)).is_err() {
                    break;
                }
            }
        });
        let exception_task = tokio::spawn(async move {
            while let Some(event) = exceptions.next().await {
                if sender.send(ConsoleEntry::from_exception(&event)).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            entries,
            tasks: vec![call_task, exception_task],
        })
    }

    /// Everything recorded since the previous call.
    pub fn drain(&mut self) -> ConsoleReport {
        let mut entries = Vec::new();
        while let Ok(entry) = self.entries.try_recv() {
            entries.push(entry);
        }
        ConsoleReport { entries }
    }
}

impl Drop for ConsoleRecorder {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsoleReport {
    pub entries: Vec<ConsoleEntry>,
}

impl ConsoleReport {
    pub fn diagnostics(&self) -> Vec<PageDiagnostic> {
        self.entries.iter().filter_map(ConsoleEntry::diagnostic).collect()
    }

    pub fn unexpected_errors(&self) -> Vec<&ConsoleEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.is_unexpected_error())
            .collect()
    }

    pub fn print(&self, errors_only: bool) {
        let errors = self.unexpected_errors();
        println!("\n Browser console: {} message(s)", self.entries.len());
        if !errors_only {
            for entry in &self.entries {
                println!("   {}", entry);
            }
        }

        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            println!("\n Declined handler inputs:");
            for diagnostic in diagnostics {
                match diagnostic {
                    PageDiagnostic::SliderRejected(reason) => println!("   slider: {}", reason),
                    PageDiagnostic::SelectUnmatched(reason) => println!("   select: {}", reason),
                }
            }
        }

        if errors.is_empty() {
            println!("\n No errors detected!");
        } else {
            println!("\n Errors:");
            for entry in errors {
                println!("   {}", entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: ConsoleLevel, text: &str) -> ConsoleEntry {
        ConsoleEntry {
            level,
            text: text.to_owned(),
        }
    }

    #[test]
    fn declined_inputs_are_not_errors() {
        let slider = PageDiagnostic::SliderRejected("invalid slider value \"x\"".to_owned());
        let select = PageDiagnostic::SelectUnmatched("unknown percentage \"75%\"".to_owned());
        let report = ConsoleReport {
            entries: vec![
                entry(ConsoleLevel::Error, &slider.to_string()),
                entry(ConsoleLevel::Info, &select.to_string()),
                entry(ConsoleLevel::Info, "app started"),
            ],
        };
        assert_eq!(report.diagnostics(), [slider, select]);
        assert!(report.unexpected_errors().is_empty());
    }

    #[test]
    fn exceptions_and_plain_errors_are_unexpected() {
        let report = ConsoleReport {
            entries: vec![
                entry(ConsoleLevel::Warning, "slow frame"),
                entry(ConsoleLevel::Error, "Failed to install testingApp API"),
                entry(ConsoleLevel::Exception, "RuntimeError: unreachable"),
            ],
        };
        let errors: Vec<_> = report
            .unexpected_errors()
            .into_iter()
            .map(|entry| entry.level)
            .collect();
        assert_eq!(errors, [ConsoleLevel::Error, ConsoleLevel::Exception]);
    }

    #[test]
    fn call_levels() {
        assert_eq!(ConsoleLevel::of_call(&ConsoleApiCalledType::Assert), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::of_call(&ConsoleApiCalledType::Warning), ConsoleLevel::Warning);
        assert_eq!(ConsoleLevel::of_call(&ConsoleApiCalledType::Log), ConsoleLevel::Info);
    }

    #[test]
    fn entries_display_with_level() {
        assert_eq!(
            entry(ConsoleLevel::Exception, "boom").to_string(),
            "[exception] boom"
        );
    }
}
