mod halfblock;
mod kitty;

pub use halfblock::HalfBlockRenderer;
pub use kitty::KittyRenderer;

use crate::page::Region;
use std::io::Write;

pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    pub visual_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels_rgba: &'a [u8],
    pub labels: &'a [Region],
    pub hud: &'a str,
    pub hud_rows: u16,
    pub overlay: Option<&'a str>,
    pub sync_updates: bool,
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

/// Page labels as plain text on top of the effect image. Interactive
/// elements get a brighter foreground.
pub fn write_labels(out: &mut dyn Write, frame: &Frame<'_>) -> anyhow::Result<()> {
    let cols = frame.term_cols as usize;
    for r in frame.labels {
        if r.row >= frame.visual_rows || r.col as usize >= cols {
            continue;
        }
        let room = cols - r.col as usize;
        let text: String = r.label.chars().take(room).collect();
        let fg = if r.element.is_interactive() {
            "\x1b[1m\x1b[38;2;245;236;255m"
        } else {
            "\x1b[38;2;200;190;230m"
        };
        write!(out, "\x1b[{};{}H\x1b[0m{fg}{text}\x1b[0m", r.row + 1, r.col + 1)?;
    }
    Ok(())
}

pub fn write_hud(out: &mut dyn Write, frame: &Frame<'_>) -> anyhow::Result<()> {
    let cols = frame.term_cols as usize;
    let mut lines = frame.hud.lines();
    for i in 0..(frame.hud_rows as usize) {
        write!(out, "\x1b[{};1H\x1b[0m\x1b[2K", frame.visual_rows as usize + i + 1)?;
        if let Some(line) = lines.next() {
            let line: String = line.chars().take(cols).collect();
            write!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Centered boxed text over a dimmed screen.
pub fn draw_overlay_popup(
    out: &mut dyn Write,
    term_cols: u16,
    term_rows: u16,
    text: &str,
) -> anyhow::Result<()> {
    let cols = term_cols as usize;
    let rows = term_rows as usize;
    if text.trim().is_empty() || cols < 8 || rows < 4 {
        return Ok(());
    }

    let max_inner = cols.saturating_sub(6).max(1);
    let lines: Vec<String> = text
        .lines()
        .map(|l| l.chars().take(max_inner).collect())
        .take(rows.saturating_sub(3).max(1))
        .collect();
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(1, max_inner);
    let box_w = inner + 4;
    let box_h = lines.len() + 2;
    let left = cols.saturating_sub(box_w) / 2 + 1;
    let top = rows.saturating_sub(box_h) / 2 + 1;
    let edge = format!("+{}+", "-".repeat(box_w - 2));

    out.write_all(b"\x1b[0m\x1b[38;2;236;230;255m\x1b[48;2;12;6;28m")?;
    write!(out, "\x1b[{top};{left}H{edge}")?;
    for (i, line) in lines.iter().enumerate() {
        let pad = inner - line.chars().count();
        write!(
            out,
            "\x1b[{};{left}H| {line}{} |",
            top + 1 + i,
            " ".repeat(pad)
        )?;
    }
    write!(out, "\x1b[{};{left}H{edge}", top + box_h - 1)?;
    out.write_all(b"\x1b[0m")?;
    Ok(())
}
