//! ANSI color helper utilities for terminal output.

use crate::models::duty_status::DutyStatus;
use crate::models::violation::Severity;
use ansi_term::Colour;

pub const RESET: &str = "\x1b[0m";
pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Duty status painted with its conventional logbook color.
pub fn paint_status(status: DutyStatus) -> String {
    let label = status.to_db_str();
    match status {
        DutyStatus::Off => Colour::Green.paint(label).to_string(),
        DutyStatus::Sb => Colour::Cyan.paint(label).to_string(),
        DutyStatus::Dr => Colour::Red.bold().paint(label).to_string(),
        DutyStatus::On => Colour::Yellow.paint(label).to_string(),
    }
}

pub fn paint_severity(severity: Severity) -> String {
    let label = severity.to_db_str();
    match severity {
        Severity::Violation => Colour::Yellow.paint(label).to_string(),
        Severity::Critical => Colour::Red.bold().paint(label).to_string(),
    }
}

/// Green when the driver may drive, red otherwise.
pub fn paint_can_drive(can_drive: bool) -> String {
    if can_drive {
        Colour::Green.bold().paint("YES").to_string()
    } else {
        Colour::Red.bold().paint("NO").to_string()
    }
}
