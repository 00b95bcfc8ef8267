use std::io::Write;

use counter_core::{report::render_rejection_status, UiCoordinator};
use counter_logging::counter_warn;

fn local_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Terminal rendition of the result area and status bar. Input is refused
/// while a dispatch is in flight.
pub struct TerminalCoordinator<W: Write> {
    out: W,
    clock: fn() -> String,
    controls_enabled: bool,
}

impl<W: Write> TerminalCoordinator<W> {
    pub fn new(out: W) -> Self {
        Self::with_clock(out, local_clock)
    }

    pub fn with_clock(out: W, clock: fn() -> String) -> Self {
        Self {
            out,
            clock,
            controls_enabled: true,
        }
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn notify_busy(&mut self) {
        self.write_status("Aguarde: processamento em andamento.");
    }

    /// Output that is neither a report nor a status line (help text, local errors).
    pub fn print(&mut self, text: &str) {
        self.write(|out| writeln!(out, "{text}"));
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_report(&mut self, report: &str) {
        self.write(|out| writeln!(out, "\n{report}\n"));
    }

    fn write_status(&mut self, status: &str) {
        let stamp = (self.clock)();
        self.write(|out| writeln!(out, "[{stamp}] {status}"));
    }

    fn write(&mut self, f: impl FnOnce(&mut W) -> std::io::Result<()>) {
        if let Err(err) = f(&mut self.out).and_then(|()| self.out.flush()) {
            counter_warn!("failed to write to terminal: {}", err);
        }
    }
}

impl<W: Write> UiCoordinator for TerminalCoordinator<W> {
    fn on_dispatch_started(&mut self, status: &str) {
        self.controls_enabled = false;
        self.write_status(status);
    }

    fn on_outcome(&mut self, report: &str, status: &str) {
        self.write_report(report);
        self.write_status(status);
        self.controls_enabled = true;
    }

    fn on_rejected(&mut self, message: &str) {
        self.write_status(&render_rejection_status(message));
    }

    fn on_notice(&mut self, report: &str, status: &str) {
        self.write_report(report);
        self.write_status(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_clock() -> String {
        "12:00:00".to_string()
    }

    fn output(coordinator: TerminalCoordinator<Vec<u8>>) -> String {
        String::from_utf8(coordinator.into_inner()).unwrap()
    }

    #[test]
    fn controls_are_disabled_between_start_and_outcome() {
        let mut coordinator = TerminalCoordinator::with_clock(Vec::new(), fixed_clock);
        assert!(coordinator.controls_enabled());

        coordinator.on_dispatch_started("Processando texto (3 caracteres)...");
        assert!(!coordinator.controls_enabled());

        coordinator.on_outcome("RELATORIO", "Concluído");
        assert!(coordinator.controls_enabled());

        assert_eq!(
            output(coordinator),
            "[12:00:00] Processando texto (3 caracteres)...\n\nRELATORIO\n\n[12:00:00] Concluído\n"
        );
    }

    #[test]
    fn rejection_prints_error_status_only() {
        let mut coordinator = TerminalCoordinator::with_clock(Vec::new(), fixed_clock);
        coordinator.on_rejected("Texto não pode estar vazio!");
        assert!(coordinator.controls_enabled());
        assert_eq!(
            output(coordinator),
            "[12:00:00] Erro: Texto não pode estar vazio!\n"
        );
    }

    #[test]
    fn busy_notice_is_a_status_line() {
        let mut coordinator = TerminalCoordinator::with_clock(Vec::new(), fixed_clock);
        coordinator.notify_busy();
        assert_eq!(
            output(coordinator),
            "[12:00:00] Aguarde: processamento em andamento.\n"
        );
    }
}
