//! Panic hook printing a crash report with the current run context.

use super::context::{get_current_context, RunContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

/// Install the crash report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    eprintln!();
    for line in crash_report_lines(&extract_panic_message(info), location(info), &context) {
        eprintln!("{}", line);
    }
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    }
}

fn location(info: &PanicHookInfo<'_>) -> Option<String> {
    info.location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
}

fn boxed(text: &str) -> String {
    format!("║  {:<width$}║", truncate(text, WIDTH - 2), width = WIDTH - 2)
}

fn crash_report_lines(
    message: &str,
    location: Option<String>,
    context: &RunContext,
) -> Vec<String> {
    let rule = "═".repeat(WIDTH);
    let mut lines = vec![
        format!("╔{}╗", rule),
        boxed("FIRMRANK CRASH REPORT"),
        format!("╠{}╣", rule),
        boxed(&format!("Version: {}", VERSION)),
        boxed(&format!("Platform: {}", std::env::consts::OS)),
        boxed(&format!(
            "Time: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )),
        format!("╠{}╣", rule),
        boxed(&format!("PANIC: {}", message)),
    ];
    if let Some(loc) = location {
        lines.push(boxed(&format!("Location: {}", loc)));
    }
    lines.push(format!("╠{}╣", rule));
    match &context.phase {
        Some(phase) => lines.push(boxed(&format!("Phase: {}", phase))),
        None => lines.push(boxed("Phase: (not set)")),
    }
    if let Some(file) = &context.current_file {
        lines.push(boxed(&format!("File: {}", file.display())));
    }
    if std::env::var("RUST_BACKTRACE").is_err() {
        lines.push(boxed("Run with RUST_BACKTRACE=1 for stack trace"));
    }
    lines.push(format!("╚{}╝", rule));
    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
