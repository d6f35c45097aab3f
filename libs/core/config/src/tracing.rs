use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter, Layer, Registry};

const PRODUCTION_FILTER: &str = "info,sqlx=warn,sea_orm=warn";
const DEVELOPMENT_FILTER: &str = "debug,sqlx=info,sea_orm=info,hyper=info";

/// Install color-eyre for the binary's error reports.
///
/// Safe to call more than once; later calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// `RUST_LOG` when set, otherwise the per-environment default.
fn log_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if environment.is_production() {
            PRODUCTION_FILTER
        } else {
            DEVELOPMENT_FILTER
        })
    })
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn output_layer(environment: &Environment) -> BoxedLayer {
    if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .pretty()
            .boxed()
    }
}

/// Initialize the global tracing subscriber.
///
/// - **Production** (`APP_ENV=production`): flattened JSON lines, default filter `info`.
/// - **Development**: pretty output, default filter `debug`.
///
/// `RUST_LOG` overrides the default filter in both modes. An `ErrorLayer` is
/// always installed so eyre reports carry span traces.
///
/// A second call is a no-op, so tests may bootstrap freely.
pub fn init_tracing(environment: &Environment) {
    let result = tracing_subscriber::registry()
        .with(output_layer(environment))
        .with(tracing_error::ErrorLayer::default())
        .with(log_filter(environment))
        .try_init();

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_depends_on_environment() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert!(log_filter(&Environment::Production).to_string().contains("sqlx=warn"));
            assert!(log_filter(&Environment::Development).to_string().contains("hyper=info"));
        });
    }

    #[test]
    fn test_rust_log_overrides_default_filter() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            let filter = log_filter(&Environment::Production).to_string();
            assert!(filter.contains("warn"));
            assert!(!filter.contains("sqlx"));
        });
    }

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }
}
