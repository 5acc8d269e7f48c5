use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a compact stderr subscriber for hosts that embed the task core.
///
/// `filter` takes a default directive such as `"debug"` or `"todo_core=trace"`; `RUST_LOG`
/// still refines it. Calling this more than once keeps the first subscriber.
pub fn init_tracing(filter: Option<String>) -> Result<()> {
    let filter = filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    let directive: Directive = filter
        .parse()
        .with_context(|| format!("invalid log filter '{filter}'"))?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
    Ok(())
}
