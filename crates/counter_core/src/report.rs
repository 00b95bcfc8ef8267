//! Deterministic text reports for the results panel and the status line.
//!
//! Every function here is pure: identical input always yields byte-identical
//! output, which keeps the reports usable as golden test fixtures.

use crate::{HealthOutcome, Outcome, ProcessingFailure, ProcessingStats};

pub const RULE_WIDTH: usize = 60;
pub const RAW_BODY_EXCERPT_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "... (truncado)";

const TITLE: &str = "RESULTADO DO PROCESSAMENTO";

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Full multi-line report for a processing outcome.
pub fn render(outcome: &Outcome, source_label: &str) -> String {
    let mut lines = vec![
        rule(),
        TITLE.to_string(),
        format!("Fonte: {source_label}"),
        rule(),
        String::new(),
    ];

    match outcome {
        Outcome::Success(stats) => push_success(&mut lines, stats),
        Outcome::Failure(failure) => push_failure(&mut lines, failure),
    }

    lines.push(String::new());
    lines.push(rule());
    lines.join("\n")
}

/// One-line summary for the status bar.
pub fn render_status(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success(_) => "Processamento concluído com sucesso!".to_string(),
        Outcome::Failure(failure) => format!("Erro no processamento: {}", failure.message),
    }
}

fn push_success(lines: &mut Vec<String>, stats: &ProcessingStats) {
    lines.push("✅ Processamento concluído com sucesso!".to_string());
    lines.push(String::new());
    lines.push("📊 ESTATÍSTICAS:".to_string());
    lines.push(format!("   Letras encontradas:     {:>8}", stats.letters_count));
    lines.push(format!("   Números encontrados:    {:>8}", stats.numbers_count));
    lines.push(format!("   Total de caracteres:    {:>8}", stats.total_characters));
    lines.push(format!(
        "   Tempo de processamento: {:>8.2} ms",
        stats.processing_time_ms
    ));

    if let Some((letter_pct, number_pct)) = distribution(stats) {
        lines.push(String::new());
        lines.push("📈 DISTRIBUIÇÃO:".to_string());
        lines.push(format!("   Letras:  {letter_pct:>6.2}%"));
        lines.push(format!("   Números: {number_pct:>6.2}%"));
    }
}

/// Letter/number split over `letters + numbers` (not `total_characters`).
/// `None` when nothing was counted, so no 0%/0% block is ever rendered.
pub fn distribution(stats: &ProcessingStats) -> Option<(f64, f64)> {
    let counted = stats.letters_count.saturating_add(stats.numbers_count);
    if counted == 0 {
        return None;
    }
    let letter_pct = stats.letters_count as f64 / counted as f64 * 100.0;
    Some((letter_pct, 100.0 - letter_pct))
}

fn push_failure(lines: &mut Vec<String>, failure: &ProcessingFailure) {
    lines.push("❌ Falha no processamento!".to_string());
    lines.push(String::new());
    lines.push(format!("💥 ERRO: {}", failure.message));

    let Some(raw) = failure.raw_body.as_deref().filter(|raw| !raw.is_empty()) else {
        return;
    };
    lines.push(String::new());
    lines.push("📄 Resposta do servidor:".to_string());
    lines.push(raw.chars().take(RAW_BODY_EXCERPT_CHARS).collect());
    if raw.chars().count() > RAW_BODY_EXCERPT_CHARS {
        lines.push(TRUNCATION_MARKER.to_string());
    }
}

pub fn render_health(health: &HealthOutcome, base_url: &str) -> String {
    match health {
        HealthOutcome::Healthy { service_status } => {
            let mut report = format!(
                "✅ Servidor está operacional e pronto para processar requisições!\nURL: {base_url}"
            );
            if let Some(status) = service_status {
                report.push_str(&format!("\nEstado informado: {status}"));
            }
            report
        }
        HealthOutcome::Unhealthy { status } => {
            format!("❌ Servidor respondeu com status {status}.\nURL: {base_url}")
        }
        HealthOutcome::Unreachable { message, .. } => format!(
            "❌ Servidor não está disponível ou com problemas.\nErro: {message}\nVerifique se o servidor está rodando em: {base_url}"
        ),
    }
}

pub fn render_health_status(health: &HealthOutcome, base_url: &str) -> String {
    match health {
        HealthOutcome::Healthy { .. } => format!("Servidor operacional: {base_url}"),
        HealthOutcome::Unhealthy { .. } => format!("Servidor com problemas: {base_url}"),
        HealthOutcome::Unreachable { .. } => format!("Servidor não disponível: {base_url}"),
    }
}

pub fn render_welcome(base_url: &str) -> (String, String) {
    (
        format!(
            "Cliente iniciado.\nServidor configurado: {base_url}\n\nPronto para processar arquivos e textos."
        ),
        format!("Pronto. Servidor: {base_url}"),
    )
}

pub fn render_endpoint_configured(base_url: &str) -> (String, String) {
    (
        format!("Servidor configurado para: {base_url}"),
        format!("Servidor configurado: {base_url}"),
    )
}

pub fn render_dispatch_started(source_label: &str) -> String {
    format!("Processando {}...", source_label.to_lowercase())
}

pub const HEALTH_CHECK_STARTED: &str = "Verificando status do servidor...";

pub fn render_rejection_status(message: &str) -> String {
    format!("Erro: {message}")
}
