use crate::render::{draw_overlay_popup, write_hud, write_labels, Frame, Renderer};
use std::io::Write;

/// One upper-half block per cell: foreground paints the top pixel, background
/// the bottom one. Larger pixel buffers are box-filtered down to `cols x 2*rows`.
pub struct HalfBlockRenderer {
    last_fg: Option<(u8, u8, u8)>,
    last_bg: Option<(u8, u8, u8)>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Average of the `bw x bh` block starting at `(x0, y0)`.
fn block_average(frame: &Frame<'_>, x0: usize, y0: usize, bw: usize, bh: usize) -> (u8, u8, u8) {
    let w = frame.pixel_width;
    let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);
    for y in y0..y0 + bh {
        for x in x0..x0 + bw {
            let i = (y * w + x) * 4;
            r += frame.pixels_rgba[i] as u32;
            g += frame.pixels_rgba[i + 1] as u32;
            b += frame.pixels_rgba[i + 2] as u32;
        }
    }
    let n = (bw * bh).max(1) as u32;
    ((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        let w = frame.pixel_width;
        let h = frame.pixel_height;

        if cols == 0 || visual_rows == 0 || w == 0 || h == 0 {
            return Ok(());
        }
        let bw = w / cols;
        let bh = h / (visual_rows * 2);
        if bw == 0 || bh == 0 || frame.pixels_rgba.len() < w * h * 4 {
            // Buffer lags a resize by a frame; skip rather than index out of bounds.
            return Ok(());
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }
        out.write_all(b"\x1b[H\x1b[0m")?;
        // Disable autowrap (DECAWM) while we paint full-width rows.
        out.write_all(b"\x1b[?7l")?;
        self.last_fg = None;
        self.last_bg = None;

        const HALF_BLOCK: char = '\u{2580}';

        for row in 0..visual_rows {
            for col in 0..cols {
                let top = block_average(frame, col * bw, row * 2 * bh, bw, bh);
                let bot = block_average(frame, col * bw, (row * 2 + 1) * bh, bw, bh);
                if self.last_fg != Some(top) {
                    write!(out, "\x1b[38;2;{};{};{}m", top.0, top.1, top.2)?;
                    self.last_fg = Some(top);
                }
                if self.last_bg != Some(bot) {
                    write!(out, "\x1b[48;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    self.last_bg = Some(bot);
                }
                write!(out, "{HALF_BLOCK}")?;
            }
            out.write_all(b"\r\n")?;
        }

        write_labels(out, frame)?;
        write_hud(out, frame)?;
        if let Some(text) = frame.overlay {
            draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
        }

        out.write_all(b"\x1b[?7h")?;
        if frame.sync_updates {
            out.write_all(b"\x1b[?2026l")?;
        }
        out.flush()?;
        Ok(())
    }
}
