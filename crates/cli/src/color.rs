// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color handling.

use termcolor::{Color, ColorChoice, ColorSpec};

/// `--color` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against `--no-color`, `NO_COLOR`, and whether the stream the
    /// output goes to is a terminal.
    pub fn choice(self, no_color: bool, is_terminal: bool) -> ColorChoice {
        match self {
            ColorMode::Always => resolve_color(true, no_color),
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto => {
                let env_no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
                auto_color(no_color || env_no_color, is_terminal)
            }
        }
    }
}

/// `--color=auto`: color only when writing to a terminal and not disabled.
pub fn auto_color(disabled: bool, is_terminal: bool) -> ColorChoice {
    if disabled || !is_terminal { ColorChoice::Never } else { ColorChoice::Auto }
}

/// Resolve an explicit force flag against `--no-color`.
///
/// `--no-color` always wins.
pub fn resolve_color(force_color: bool, no_color: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else if force_color {
        ColorChoice::Always
    } else {
        ColorChoice::Auto
    }
}

/// Color scheme for summary output.
pub mod scheme {
    use super::*;

    pub fn service_name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
