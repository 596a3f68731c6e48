use crate::config::RendererMode;

#[derive(Debug, Clone)]
pub struct CapabilityReport {
    pub auto_probe: bool,
    pub requested_renderer: RendererMode,
    pub renderer: RendererMode,
    notes: Vec<String>,
}

impl CapabilityReport {
    pub fn changed(&self) -> bool {
        self.renderer != self.requested_renderer
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn status_label(&self) -> String {
        if !self.auto_probe {
            return format!("off (renderer={:?})", self.renderer);
        }
        if self.changed() {
            return format!(
                "fallback ren {:?}->{:?}",
                self.requested_renderer, self.renderer
            );
        }
        format!("ok ren={:?}", self.renderer)
    }
}

pub fn probe_renderer(requested: RendererMode, auto_probe: bool) -> CapabilityReport {
    probe_with(requested, auto_probe, kitty_graphics_available())
}

/// Probe outcome for a known kitty answer; split out so the decision is
/// testable without touching the environment.
pub fn probe_with(requested: RendererMode, auto_probe: bool, kitty: bool) -> CapabilityReport {
    let mut report = CapabilityReport {
        auto_probe,
        requested_renderer: requested,
        renderer: requested,
        notes: Vec::new(),
    };

    if !auto_probe {
        report.notes.push("capability probe disabled by --auto-probe=false".into());
        return report;
    }

    if requested == RendererMode::Kitty && !kitty {
        report.renderer = RendererMode::HalfBlock;
        report
            .notes
            .push("kitty graphics unavailable in this terminal; falling back to half-block renderer".into());
        tracing::warn!("kitty graphics unavailable; using half-block renderer");
    }

    if report.notes.is_empty() {
        report.notes.push("probe selected requested renderer with no fallback".into());
    }
    report
}

fn kitty_graphics_available() -> bool {
    if let Ok(v) = std::env::var("AMBIENT_FX_FORCE_KITTY") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => return true,
            "0" | "false" | "no" | "off" => return false,
            _ => {}
        }
    }

    if std::env::var("KITTY_WINDOW_ID").is_ok() {
        return true;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    let term_program = std::env::var("TERM_PROGRAM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    term.contains("kitty") || term_program.contains("ghostty") || term_program.contains("kitty")
}
