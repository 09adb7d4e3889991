// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the findkit CLI.
//!
//! Snippets and rendered fields are markup. On a terminal the highlight tags
//! become bold color and the common entities are decoded; piped output keeps
//! the markup untouched so it can be pasted into a page. `NO_COLOR` and
//! non-TTY stdout both turn colors off.
//!
//! Theme: `FINDKIT_THEME` ("dark" or "light"), then `COLORFGBG`, then dark.

use std::sync::OnceLock;

use regex::Regex;

/// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("FINDKIT_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": colors 0-6 and 8 are dark backgrounds
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

/// OneDark / One Light pairs.
mod palette {
    pub const YELLOW: [(u8, u8, u8); 2] = [(229, 192, 123), (193, 132, 1)];
    pub const CYAN: [(u8, u8, u8); 2] = [(86, 182, 194), (1, 132, 188)];
    pub const GRAY: [(u8, u8, u8); 2] = [(92, 99, 112), (160, 161, 167)];
}

fn pick(pair: [(u8, u8, u8); 2]) -> String {
    match theme() {
        Theme::Dark => rgb(pair[0]),
        Theme::Light => rgb(pair[1]),
    }
}

#[allow(non_snake_case)]
pub fn YELLOW() -> String {
    pick(palette::YELLOW)
}

#[allow(non_snake_case)]
pub fn CYAN() -> String {
    pick(palette::CYAN)
}

#[allow(non_snake_case)]
pub fn GRAY() -> String {
    pick(palette::GRAY)
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, excluding ANSI codes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn strong_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<strong class="[^"]*">(.*?)</strong>"#).ok())
        .as_ref()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#8230;", "…")
        .replace("&#183;", "·")
        .replace("&amp;", "&")
}

/// Markup as terminal text: highlights in bold yellow, entities decoded.
pub fn terminal_markup(markup: &str, colors: bool) -> String {
    if !colors {
        return markup.to_string();
    }
    let Some(re) = strong_re() else {
        return decode_entities(markup);
    };
    let highlighted = re.replace_all(markup, |caps: &regex::Captures<'_>| {
        format!("{}{}{}{}", BOLD, YELLOW(), &caps[1], RESET)
    });
    decode_entities(&highlighted)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}┐{}",
        border,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", GRAY(), "─".repeat(BOX_WIDTH), RESET);
}
