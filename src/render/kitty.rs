use crate::render::{draw_overlay_popup, write_hud, write_labels, Frame, Renderer};
use anyhow::Context;
use base64::Engine;
use std::io::Write;

/// Kitty graphics protocol, direct (inline base64) transmission. The image is
/// placed below the text layer (`z=-1`) so page labels and the HUD stay
/// readable on top of it.
pub struct KittyRenderer {
    image_id: u32,
    b64_buf: Vec<u8>,
}

impl KittyRenderer {
    pub fn new() -> Self {
        Self {
            image_id: 1,
            b64_buf: Vec::new(),
        }
    }
}

impl Default for KittyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for KittyRenderer {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        let w = frame.pixel_width;
        let h = frame.pixel_height;

        if cols == 0 || visual_rows == 0 || w == 0 || h == 0 {
            return Ok(());
        }
        if frame.pixels_rgba.len() < w * h * 4 {
            return Ok(());
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }

        out.write_all(b"\x1b[H")?;
        write_direct_rgba(
            out,
            &frame.pixels_rgba[..w * h * 4],
            w,
            h,
            cols,
            visual_rows,
            self.image_id,
            &mut self.b64_buf,
        )?;

        // Text cells persist between frames; wipe them before re-laying labels.
        clear_text_rows(out, visual_rows)?;
        write_labels(out, frame)?;
        write_hud(out, frame)?;
        if let Some(text) = frame.overlay {
            draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026l")?;
        }
        out.flush()?;
        Ok(())
    }
}

fn write_direct_rgba(
    out: &mut dyn Write,
    rgba: &[u8],
    w: usize,
    h: usize,
    cols: usize,
    rows: usize,
    image_id: u32,
    b64_buf: &mut Vec<u8>,
) -> anyhow::Result<()> {
    // Multiple of 3 so every chunk but the last encodes without padding.
    const RAW_CHUNK: usize = 3 * 1024;

    let chunks = rgba.chunks(RAW_CHUNK);
    let total = chunks.len();
    for (i, chunk) in chunks.enumerate() {
        let b64_len = chunk.len().div_ceil(3) * 4;
        if b64_buf.len() < b64_len {
            b64_buf.resize(b64_len, 0);
        }
        let written = base64::engine::general_purpose::STANDARD
            .encode_slice(chunk, &mut b64_buf[..b64_len])
            .context("base64 encode pixels")?;

        let more = u8::from(i + 1 < total);
        if i == 0 {
            write!(
                out,
                "\x1b_Ga=T,f=32,s={w},v={h},t=d,i={image_id},p=1,c={cols},r={rows},C=1,q=2,z=-1,m={more};"
            )?;
        } else {
            write!(out, "\x1b_Gm={more};")?;
        }
        out.write_all(&b64_buf[..written])?;
        out.write_all(b"\x1b\\")?;
    }
    Ok(())
}

fn clear_text_rows(out: &mut dyn Write, rows: usize) -> anyhow::Result<()> {
    for row in 1..=rows {
        write!(out, "\x1b[{row};1H\x1b[0m\x1b[2K")?;
    }
    Ok(())
}
