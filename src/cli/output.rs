use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use hearth_domain::{AlertSeverity, HealthStatus};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
    Separator,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    pub high_contrast_mode: bool,
    pub quiet_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn should_skip(kind: MessageKind, prefs: &OutputPreferences) -> bool {
    prefs.quiet_mode && matches!(kind, MessageKind::Separator | MessageKind::Info)
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "INFO",
        MessageKind::Success => "OK",
        MessageKind::Warning => "WARNING",
        MessageKind::Error => "ERROR",
        MessageKind::Section | MessageKind::Separator => "",
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Separator => String::from("----------------------------------------"),
        _ => format!("{}: {text}", label(kind)),
    };

    if prefs.high_contrast_mode {
        return match kind {
            MessageKind::Info | MessageKind::Separator => formatted,
            _ => formatted.bold().to_string(),
        };
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Separator | MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    if should_skip(kind, &prefs) {
        return;
    }
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn separator() {
    print(MessageKind::Separator, "");
}

/// Aligned `label: value` row.
pub fn row(label: &str, value: impl fmt::Display) {
    println!("{:<24}{}", format!("{label}:"), value);
}

/// Status word coloured by severity, or bold only in high-contrast mode.
pub fn status_label(status: HealthStatus) -> String {
    style_status(status, &preferences())
}

fn style_status(status: HealthStatus, prefs: &OutputPreferences) -> String {
    let text = status.to_string();
    if prefs.high_contrast_mode {
        return text.bold().to_string();
    }
    match status {
        HealthStatus::Healthy => text.bright_green().bold().to_string(),
        HealthStatus::Caution => text.bright_yellow().bold().to_string(),
        HealthStatus::Danger => text.bright_red().bold().to_string(),
    }
}

pub fn alert(severity: AlertSeverity, message: impl fmt::Display) {
    match severity {
        AlertSeverity::Critical => error(message),
        AlertSeverity::Warning => warning(message),
        AlertSeverity::Info => info(message),
    }
}
