use std::io::Write;

use chrono::Local;
use env_logger::{Env, Target};

/// Installs a JSON-lines logger on stdout, filtered by `RUST_LOG`
/// (default `info`). Does nothing if a logger is already installed, so host
/// applications keep their own.
pub fn init() {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let line = json_line(
                &ts.to_string(),
                &level,
                &record.args().to_string(),
                record.target(),
            );
            writeln!(buf, "{line}")
        })
        .target(Target::Stdout)
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialised, keeping the existing one");
    }
}

fn json_line(timestamp: &str, level: &str, message: &str, target: &str) -> String {
    serde_json::json!({
        "timestamp": timestamp,
        "level": level,
        "message": message,
        "target": target,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        log::info!("logger ready");
    }

    #[test]
    fn test_json_line_escapes_every_field() {
        let line = json_line(
            "2025-01-01T00:00:00.000+00:00",
            "info",
            "said \"hi\"",
            "case_api::\"odd\"",
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "said \"hi\"");
        assert_eq!(parsed["target"], "case_api::\"odd\"");
        assert_eq!(parsed["level"], "info");
    }
}
