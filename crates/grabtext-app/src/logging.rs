use tracing_subscriber::EnvFilter;

const CRATES: [&str; 6] = [
    "grabtext",
    "grabtext_types",
    "grabtext_config",
    "grabtext_capture",
    "grabtext_ocr",
    "grabtext_core",
];

fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let crate_level = if is_dev { "debug" } else { "info" };
    let mut directives = vec!["info".to_string()];
    directives.extend(CRATES.iter().map(|c| format!("{c}={crate_level}")));
    directives
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Logs go to stderr so one-shot modes can print results on stdout.
pub fn init(json: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(build_filter_directives(cfg!(debug_assertions)).join(","))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install JSON subscriber: {e}"))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {e}"))
    }
}
