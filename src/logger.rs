use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

const DEFAULT_DIRECTIVE: &str = "info";

/// Builds the filter from a `RUST_LOG`-style directive, falling back to `info`
/// when the directive is missing or does not parse.
fn pipeline_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Stage spans (convolve, look, stack, encode) report their timing on close
/// only when the filter lets debug or trace events through.
fn stage_span_events(filter: &EnvFilter) -> FmtSpan {
    let directives = filter.to_string();
    if directives.contains("debug") || directives.contains("trace") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Installs the global subscriber for the capture pipeline, configured from `RUST_LOG`.
pub fn init() {
    let directive = std::env::var("RUST_LOG").ok();
    let filter = pipeline_filter(directive.as_deref());
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(stage_span_events(&filter));

    // Keeps the first subscriber when called more than once.
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_to_info() {
        assert_eq!(pipeline_filter(None).to_string(), DEFAULT_DIRECTIVE);
        // An unknown level is rejected, so the default applies.
        let fallback = pipeline_filter(Some("photon_stack_rs=loud"));
        assert_eq!(stage_span_events(&fallback), FmtSpan::NONE);
    }

    #[test]
    fn test_stage_spans_reported_at_debug() {
        let filter = pipeline_filter(Some("photon_stack_rs=debug"));
        assert_eq!(stage_span_events(&filter), FmtSpan::CLOSE);
        assert_eq!(stage_span_events(&pipeline_filter(None)), FmtSpan::NONE);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
    }
}
