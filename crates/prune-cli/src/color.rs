//! Terminal colors for lambda-prune output.
//!
//! Respects `NO_COLOR`, `FORCE_COLOR`, and TTY detection via `owo-colors`'
//! `if_supports_color()`, plus the `--no-color` flag.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;
use owo_colors::Stream::{self, Stderr, Stdout};

static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);

/// Call once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

fn disabled() -> bool {
    NO_COLOR_FLAG.load(Ordering::Relaxed)
}

// Function names: #7CB4C8
const ICE: (u8, u8, u8) = (124, 180, 200);

// Retained / deleted: #6B8F5E
const AURORA: (u8, u8, u8) = (107, 143, 94);

// Dry-run orphans: #C49A5C
const COPPER: (u8, u8, u8) = (196, 154, 92);

// Failures: #B87060
const EMBER: (u8, u8, u8) = (184, 112, 96);

// Borders and hints: #5C6370
const MUTED: (u8, u8, u8) = (92, 99, 112);

fn paint(text: &str, stream: Stream, rgb: (u8, u8, u8)) -> String {
    if disabled() {
        return text.to_string();
    }
    text.if_supports_color(stream, |t| t.truecolor(rgb.0, rgb.1, rgb.2))
        .to_string()
}

pub fn ice(text: &str) -> String {
    paint(text, Stdout, ICE)
}

pub fn aurora(text: &str) -> String {
    paint(text, Stdout, AURORA)
}

pub fn copper(text: &str) -> String {
    paint(text, Stdout, COPPER)
}

pub fn ember(text: &str) -> String {
    paint(text, Stdout, EMBER)
}

pub fn muted(text: &str) -> String {
    paint(text, Stdout, MUTED)
}

pub fn bold(text: &str) -> String {
    if disabled() {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

/// Error styling for stderr messages.
pub fn error(text: &str) -> String {
    paint(text, Stderr, EMBER)
}

/// Warning styling for stderr messages.
pub fn warning(text: &str) -> String {
    paint(text, Stderr, COPPER)
}

/// Secondary info on stderr.
pub fn hint(text: &str) -> String {
    paint(text, Stderr, MUTED)
}
