use crate::models::shift::ShiftStatus;

/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Wrap a clock value: green for entries, red for exits, grey when missing.
pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

/// Amber for open shifts, green for closed ones.
pub fn color_for_status(status: ShiftStatus) -> &'static str {
    match status {
        ShiftStatus::Open => YELLOW,
        ShiftStatus::Closed => GREEN,
        ShiftStatus::ClosedNoEntry => CYAN,
    }
}
