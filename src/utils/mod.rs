pub mod build_info;

use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: [&str; 2] = ["hearth=info", "hearth_core=info"];

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the defaults.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = DEFAULT_DIRECTIVES
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(EnvFilter::from_default_env(), |filter, directive| {
                filter.add_directive(directive)
            });

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
