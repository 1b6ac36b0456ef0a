//! Terminal rendering: box tables, bar charts and SI number formatting.

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

/// How a command prints its result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Pretty JSON for `value`.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render `rows` under `headers` with box-drawing borders.
///
/// Numeric-looking cells are right-aligned.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| {
                if is_numeric(cell) {
                    format!(" {:>w$} ", cell, w = *w)
                } else {
                    format!(" {:<w$} ", cell, w = *w)
                }
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&line(headers.iter().map(|h| h.to_string()).collect()));
    out.push_str(&rule("├", "┼", "┤"));
    if rows.is_empty() {
        let mut empty = vec![String::new(); widths.len()];
        if let Some(first) = empty.first_mut() {
            *first = "(no data)".to_string();
        }
        out.push_str(&line(empty));
    }
    for row in rows {
        let mut cells = row.clone();
        cells.resize(widths.len(), String::new());
        out.push_str(&line(cells));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

fn is_numeric(cell: &str) -> bool {
    let trimmed = cell.trim_end_matches('%');
    !trimmed.is_empty() && trimmed.replace(',', "").parse::<f64>().is_ok()
}

/// Width of the longest bar in [`bar_chart`].
pub const BAR_WIDTH: usize = 40;

/// Horizontal bar chart, one labelled bar per row, values in SI format.
///
/// Bars are scaled to the largest value; non-positive values draw no bar.
pub fn bar_chart(rows: &[(String, f64)]) -> String {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows
        .iter()
        .map(|(_, v)| *v)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (label, value) in rows {
        let len = if max > 0.0 && *value > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<lw$} │{} {}\n",
            label,
            "█".repeat(len),
            si_format(*value),
            lw = label_width
        ));
    }
    out
}

const SI_PREFIXES: [&str; 9] = ["p", "n", "µ", "m", "", "k", "M", "G", "T"];

/// Two significant digits with an SI suffix: `42120000.0` → `42M`, `1234.0` → `1.2k`.
pub fn si_format(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let step = 10f64.powi(abs.log10().floor() as i32 - 1);
    let rounded = (abs / step).round() * step;
    let magnitude = rounded.log10().floor() as i32;

    let group = magnitude.div_euclid(3).clamp(-4, 4);
    let scaled = rounded / 10f64.powi(group * 3);
    let decimals = (1 - (magnitude - group * 3)).max(0) as usize;
    let prefix = SI_PREFIXES[(group + 4) as usize];

    format!("{}{:.*}{}", sign, decimals, scaled, prefix)
}

/// Fixed two-decimal rendering used in table cells.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}
