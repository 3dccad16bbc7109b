pub mod build_info;

use std::sync::Once;

use tracing_subscriber::filter::Directive;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, honouring `RUST_LOG` on top of
/// an `economy_core=info` default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "economy_core=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        if let Err(err) = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            tracing::debug!(error = %err, "keeping the tracing subscriber already installed");
        }
    });
}
