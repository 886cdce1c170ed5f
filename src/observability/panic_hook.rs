//! Panic hook printing a short crash report to stderr.

use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "════════════════════════════════════════════════════════════";

/// Install the crash report hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", crash_report(info));
    }));
}

fn crash_report(info: &PanicHookInfo<'_>) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!("covtree {} crashed on {}", VERSION, std::env::consts::OS),
        format!("panic: {}", extract_panic_message(info)),
    ];

    if let Some(location) = info.location() {
        lines.push(format!(
            "at: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    if let Some(metadata) = Span::current().metadata() {
        lines.push(format!("span: {}", metadata.name()));
    }

    if std::env::var("RUST_BACKTRACE").is_ok() {
        lines.push(std::backtrace::Backtrace::capture().to_string());
    } else {
        lines.push("Run with RUST_BACKTRACE=1 for a stack trace".to_string());
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    payload_message(info.payload())
}

fn payload_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_message_str() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(payload_message(payload.as_ref()), "boom");
    }

    #[test]
    fn test_payload_message_string() {
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bad tree"));
        assert_eq!(payload_message(payload.as_ref()), "bad tree");
    }

    #[test]
    fn test_payload_message_unknown() {
        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(payload_message(payload.as_ref()), "Unknown panic");
    }
}
