use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so stdout stays clean for command output.
/// `RUST_LOG` overrides `default_directives` when set.
fn init(default_directives: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let compact = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });
    let structured = json.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(structured)
        .init();
}

/// Filter directives for `level` on this crate. Dependencies stay at `warn`
/// unless the crate itself is at `debug` or finer.
fn directives(level: &str) -> String {
    let others = match level {
        "debug" | "trace" => "info",
        _ => "warn",
    };
    format!("domain_catalog={},{}", level, others)
}

pub fn init_cli_logger(level: &str) {
    init(&directives(level), false);
}

/// JSON 格式日誌，供 `--json` 輸出時使用
pub fn init_json_logger(level: &str) {
    init(&directives(level), true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_follow_level() {
        assert_eq!(directives("info"), "domain_catalog=info,warn");
        assert_eq!(directives("warn"), "domain_catalog=warn,warn");
        assert_eq!(directives("trace"), "domain_catalog=trace,info");
        assert!(EnvFilter::try_new(directives("debug")).is_ok());
    }
}
