//! CLI colors in the Sunshine daylight palette.
//!
//! Every function respects `NO_COLOR`, `FORCE_COLOR` and TTY detection through
//! `owo-colors`' `if_supports_color()`. `--no-color` sets an in-process flag
//! that bypasses owo-colors entirely.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;
use owo_colors::Stream::{self, Stderr, Stdout};

use sunshine_core::sync::RefreshOutcome;

static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);

/// Call once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

const SKY: Rgb = Rgb::from_hex(0x6FA8DC); // Primary accent, temperatures
const LEAF: Rgb = Rgb::from_hex(0x7BA05B); // Success
const SUN: Rgb = Rgb::from_hex(0xE0A93B); // Warning, retry
const STORM: Rgb = Rgb::from_hex(0xC0504D); // Error
const CLOUD: Rgb = Rgb::from_hex(0x8A919C); // Secondary info

fn paint(text: &str, stream: Stream, rgb: Rgb) -> String {
    if NO_COLOR_FLAG.load(Ordering::Relaxed) {
        return text.to_string();
    }
    text.if_supports_color(stream, |t| t.truecolor(rgb.r, rgb.g, rgb.b))
        .to_string()
}

pub fn sky(text: &str) -> String {
    paint(text, Stdout, SKY)
}

pub fn leaf(text: &str) -> String {
    paint(text, Stdout, LEAF)
}

pub fn sun(text: &str) -> String {
    paint(text, Stdout, SUN)
}

pub fn cloud(text: &str) -> String {
    paint(text, Stdout, CLOUD)
}

/// Apply bold bright text (headers).
pub fn bold(text: &str) -> String {
    if NO_COLOR_FLAG.load(Ordering::Relaxed) {
        return text.to_string();
    }
    text.if_supports_color(Stdout, |t| t.bold()).to_string()
}

/// Color a refresh outcome by severity.
pub fn outcome(outcome: RefreshOutcome) -> String {
    let label = outcome.to_string();
    match outcome {
        RefreshOutcome::Success => leaf(&label),
        RefreshOutcome::RetryableFailure => sun(&label),
        RefreshOutcome::FatalFailure => paint(&label, Stdout, STORM),
    }
}

/// Error styling for stderr messages.
pub fn error(text: &str) -> String {
    paint(text, Stderr, STORM)
}

/// Warning styling for stderr messages.
pub fn warning(text: &str) -> String {
    paint(text, Stderr, SUN)
}

/// Hint styling for secondary info on stderr.
pub fn hint(text: &str) -> String {
    paint(text, Stderr, CLOUD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        let c = Rgb::from_hex(0x6FA8DC);
        assert_eq!((c.r, c.g, c.b), (111, 168, 220));
    }

    #[test]
    fn test_no_color_returns_plain_text() {
        set_no_color();
        assert_eq!(sky("21°C"), "21°C");
        assert_eq!(outcome(RefreshOutcome::RetryableFailure), "retry");
        assert_eq!(error("boom"), "boom");
    }
}
