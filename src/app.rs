use crate::capability::{probe_renderer, CapabilityReport};
use crate::config::{Config, RendererMode};
use crate::fx::scenes::{find_scene, stage_scenes, Scene, STAGES};
use crate::host::InputEvent;
use crate::render::{Frame, HalfBlockRenderer, KittyRenderer, Renderer};
use crate::stage::Stage;
use crate::terminal::{TerminalGuard, TerminalHost};
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use std::cell::RefCell;
use std::io::BufWriter;
use std::rc::Rc;
use std::time::{Duration, Instant};

type SharedHost = Rc<RefCell<TerminalHost>>;

/// What `n` cycles through: the built-in stages, or the single custom stack
/// given with `--scene`.
struct Playbill {
    entries: Vec<(String, Vec<Scene>)>,
    current: usize,
}

impl Playbill {
    fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        if !cfg.scenes.is_empty() {
            let scenes = cfg
                .scenes
                .iter()
                .map(|n| find_scene(n))
                .collect::<Result<Vec<_>, _>>()
                .context("resolve --scene")?;
            return Ok(Self {
                entries: vec![("custom".to_string(), scenes)],
                current: 0,
            });
        }

        let mut entries = Vec::with_capacity(STAGES.len());
        for (name, _) in STAGES {
            entries.push((name.to_string(), stage_scenes(name)?));
        }
        let key = cfg.stage.trim().to_ascii_lowercase();
        let current = entries
            .iter()
            .position(|(n, _)| *n == key)
            .ok_or_else(|| crate::error::FxError::unknown_scene(format!("stage '{}'", cfg.stage)))
            .context("resolve --stage")?;
        Ok(Self { entries, current })
    }

    fn current(&self) -> (&str, &[Scene]) {
        let (name, scenes) = &self.entries[self.current];
        (name, scenes)
    }

    fn advance(&mut self) {
        self.current = (self.current + 1) % self.entries.len();
    }
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let mut playbill = Playbill::from_config(&cfg)?;
    let report = probe_renderer(cfg.renderer, cfg.auto_probe);
    for note in report.notes() {
        tracing::info!(note = note.as_str(), "capability probe");
    }

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());

    let mut renderer: Box<dyn Renderer> = match report.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Kitty => Box::new(KittyRenderer::new()),
    };

    let mut last_size = crossterm::terminal::size().context("get terminal size")?;
    if last_size.1 < 2 || last_size.0 < 4 {
        return Err(anyhow::anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            last_size.0,
            last_size.1
        ));
    }

    let mut show_hud = true;
    let mut show_help = false;
    let mut hud_rows = hud_rows_for_size(last_size, show_hud);

    let host: SharedHost = Rc::new(RefCell::new(TerminalHost::new(
        last_size.0,
        last_size.1.saturating_sub(hud_rows).max(1),
        cfg.effective_density(),
    )));

    let start = Instant::now();
    let now_ms = || start.elapsed().as_secs_f64() * 1000.0;

    let (name, scenes) = playbill.current();
    let mut stage = Stage::mount(name, &host, scenes, cfg.seed, now_ms());
    let mut fps = FpsCounter::new();
    let mut last_total_ms = 0.0f32;

    loop {
        let now = Instant::now();
        let mut resized = false;

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    match handle_key(k.code, k.modifiers, &mut show_hud, &mut show_help) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::NextStage => {
                            playbill.advance();
                            // Release the old stage's host state before the new one claims it.
                            stage.unmount();
                            let (name, scenes) = playbill.current();
                            stage = Stage::mount(name, &host, scenes, cfg.seed, now_ms());
                        }
                        KeyAction::None => {}
                    }
                    let rows = hud_rows_for_size(last_size, show_hud);
                    if rows != hud_rows {
                        hud_rows = rows;
                        resized = true;
                    }
                }
                Event::Mouse(m) => match m.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                        let p = TerminalHost::cell_center(m.column, m.row);
                        stage.dispatch(&InputEvent::PointerMove(p), now_ms());
                    }
                    _ => {}
                },
                Event::Resize(c, r) => {
                    last_size = (c, r);
                    hud_rows = hud_rows_for_size(last_size, show_hud);
                    resized = true;
                }
                _ => {}
            }
        }

        // Resize events can be missed in some terminals.
        let sz = crossterm::terminal::size()?;
        if sz != last_size {
            last_size = sz;
            hud_rows = hud_rows_for_size(last_size, show_hud);
            resized = true;
        }

        let (term_cols, term_rows) = last_size;
        let hud = if show_hud {
            build_wrapped_hud(term_cols as usize, &stage, renderer.name(), &report, fps.fps(), last_total_ms)
        } else {
            String::new()
        };
        let target_hud_rows = hud_rows_for_text(term_rows, show_hud, &hud);
        if target_hud_rows != hud_rows {
            hud_rows = target_hud_rows;
            resized = true;
        }
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);
        if resized {
            host.borrow_mut().set_size(term_cols, visual_rows);
            stage.dispatch(&InputEvent::Resize, now_ms());
        }

        stage.tick(&host, now_ms());
        let (w, h) = stage.size();

        let host_ref = host.borrow();
        let frame = Frame {
            term_cols,
            term_rows,
            visual_rows,
            pixel_width: w,
            pixel_height: h,
            pixels_rgba: stage.pixels(),
            labels: host_ref.page().regions(),
            hud: &hud,
            hud_rows,
            overlay: show_help.then(help_popup_text),
            sync_updates: cfg.sync_updates,
        };
        renderer.render(&frame, &mut out)?;
        drop(host_ref);

        fps.tick();
        last_total_ms = now.elapsed().as_secs_f32() * 1000.0;

        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    None,
    Quit,
    NextStage,
}

fn handle_key(
    code: KeyCode,
    modifiers: KeyModifiers,
    show_hud: &mut bool,
    show_help: &mut bool,
) -> KeyAction {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Esc if *show_help => {
            *show_help = false;
            KeyAction::None
        }
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('i') => {
            *show_hud = !*show_hud;
            KeyAction::None
        }
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Tab => {
            *show_help = !*show_help;
            KeyAction::None
        }
        KeyCode::Char('n') => KeyAction::NextStage,
        _ => KeyAction::None,
    }
}

fn hud_rows_for_size(size: (u16, u16), show_hud: bool) -> u16 {
    if !show_hud || size.1 <= 1 {
        return 0;
    }
    (size.1 - 1).min(2)
}

fn hud_rows_for_text(term_rows: u16, show_hud: bool, hud: &str) -> u16 {
    if !show_hud {
        return 0;
    }
    (hud.lines().count() as u16).min(term_rows.saturating_sub(1))
}

fn build_wrapped_hud(
    cols: usize,
    stage: &Stage<SharedHost>,
    renderer_name: &str,
    report: &CapabilityReport,
    fps: f32,
    total_ms: f32,
) -> String {
    let layers = stage
        .drivers()
        .iter()
        .map(|d| {
            if d.is_running() {
                d.scene_name().to_string()
            } else {
                format!("{} ({:?})", d.scene_name(), d.state())
            }
        })
        .collect::<Vec<_>>()
        .join(" + ");
    let lines = [
        format!(
            "Stage: {} | Layers: {} | FPS: {:>4.1} | ms: {:>4.1} | Renderer: {} | Probe: {}",
            stage.name(),
            layers,
            fps,
            total_ms,
            renderer_name,
            report.status_label(),
        ),
        "Keys: move mouse | n next stage | i HUD | ?/h help | q quit".to_string(),
    ];
    wrap_hud_lines(cols, &lines).join("\n")
}

fn wrap_hud_lines(cols: usize, lines: &[String]) -> Vec<String> {
    let width = cols.max(1);
    let mut out = Vec::new();
    for line in lines {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(chars.chunks(width).map(|c| c.iter().collect::<String>()));
    }
    out
}

fn help_popup_text() -> &'static str {
    "Ambient FX Hotkeys\n\
mouse  move the pointer across the page\n\
n  mount the next stage\n\
i  show/hide HUD\n\
? or h or F1 or tab  toggle this help\n\
esc  close help\n\
q or esc or ctrl-c  quit"
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
