use crate::fx::motion::{Point2D, Viewport};
use crate::host::{Element, Host, ListenerId};
use crate::page::Page;
use anyhow::Context;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use std::collections::BTreeSet;
use std::io::{stdout, Stdout, Write};

/// Logical pixels per terminal cell. Effect sizes are authored for roughly
/// this font metric.
pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;

// OSC 22 pointer shape; ignored by terminals that don't support it.
const POINTER_HIDE: &[u8] = b"\x1b]22;none\x1b\\";
const POINTER_RESTORE: &[u8] = b"\x1b]22;default\x1b\\";

pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn new() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        // Create the guard immediately so Drop will disable raw mode if
        // any subsequent setup step fails.
        let guard = Self { _private: () };

        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)
            .context("enter alternate screen")?;
        out.execute(terminal::Clear(ClearType::All))
            .context("clear screen")?;
        out.execute(cursor::Hide).context("hide cursor")?;

        Ok(guard)
    }

    pub fn stdout() -> Stdout {
        stdout()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        // Best-effort: undo anything a host may have left behind on an abrupt exit.
        let _ = out.execute(DisableMouseCapture);
        let _ = out.write_all(POINTER_RESTORE);
        let _ = out.write_all(b"\x1b[?2026l\x1b[?7h\x1b[0m");
        let _ = out.flush();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Host backed by the controlling terminal.
///
/// Listener attachment maps to terminal mouse reporting: the first attached
/// listener enables it, the last detached one disables it.
pub struct TerminalHost {
    cols: u16,
    visual_rows: u16,
    density: f32,
    page: Page,
    listeners: BTreeSet<u64>,
    next_listener: u64,
    pointer_hides: u32,
}

impl TerminalHost {
    pub fn new(cols: u16, visual_rows: u16, density: f32) -> Self {
        Self {
            cols,
            visual_rows,
            density,
            page: Page::portfolio(cols, visual_rows),
            listeners: BTreeSet::new(),
            next_listener: 1,
            pointer_hides: 0,
        }
    }

    /// Record a new terminal size; drivers pick it up on their next tick.
    pub fn set_size(&mut self, cols: u16, visual_rows: u16) {
        if (cols, visual_rows) == (self.cols, self.visual_rows) {
            return;
        }
        self.cols = cols;
        self.visual_rows = visual_rows;
        self.page = Page::portfolio(cols, visual_rows);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Centre of the cell at `(col, row)` in logical pixels.
    pub fn cell_center(col: u16, row: u16) -> Point2D {
        Point2D::new(
            (col as f32 + 0.5) * CELL_WIDTH,
            (row as f32 + 0.5) * CELL_HEIGHT,
        )
    }

    fn emit(&self, what: &str, bytes: &[u8]) {
        let mut out = stdout();
        if let Err(err) = out.write_all(bytes).and_then(|_| out.flush()) {
            tracing::warn!(%err, "terminal write failed: {what}");
        }
    }
}

impl Host for TerminalHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.cols as f32 * CELL_WIDTH,
            self.visual_rows as f32 * CELL_HEIGHT,
            self.density,
        )
    }

    fn attach_listeners(&mut self) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        if self.listeners.is_empty() {
            if let Err(err) = stdout().execute(EnableMouseCapture) {
                tracing::warn!(%err, "could not enable mouse capture");
            }
        }
        self.listeners.insert(id);
        ListenerId(id)
    }

    fn detach_listeners(&mut self, id: ListenerId) {
        if !self.listeners.remove(&id.0) {
            return;
        }
        if self.listeners.is_empty() {
            if let Err(err) = stdout().execute(DisableMouseCapture) {
                tracing::warn!(%err, "could not disable mouse capture");
            }
        }
    }

    fn element_at(&self, p: Point2D) -> Option<Element> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let col = (p.x / CELL_WIDTH) as u16;
        let row = (p.y / CELL_HEIGHT) as u16;
        self.page.hit(col, row).map(|r| r.element.clone())
    }

    /// Hide requests are counted so overlapping cursor layers restore the
    /// pointer only when the last one lets go.
    fn set_native_pointer_hidden(&mut self, hidden: bool) {
        if hidden {
            self.pointer_hides += 1;
            if self.pointer_hides == 1 {
                self.emit("hide pointer", POINTER_HIDE);
            }
        } else if self.pointer_hides > 0 {
            self.pointer_hides -= 1;
            if self.pointer_hides == 0 {
                self.emit("restore pointer", POINTER_RESTORE);
            }
        }
    }
}
