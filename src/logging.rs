use tracing_subscriber::EnvFilter;

/// Install a stderr log subscriber.
///
/// The default level for this crate follows the `-v` count:
/// - 0 -> warn
/// - 1 -> info
/// - 2 -> debug
/// - 3+ -> trace
///
/// `RUST_LOG` overrides it when set.
pub(crate) fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "simcal=warn");
        assert_eq!(default_directive(1), "simcal=info");
        assert_eq!(default_directive(2), "simcal=debug");
        assert_eq!(default_directive(3), "simcal=trace");
        assert_eq!(default_directive(u8::MAX), "simcal=trace");
    }
}
