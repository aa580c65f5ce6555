use std::fmt;
use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The kind of environment the process runs in.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

static INIT: Once = Once::new();

/// Set up the global logging subscriber.
///
/// Records emitted through the `log` facade end up in the same subscriber. Calling this more than
/// once has no effect.
pub fn init_tracing(environment: Environment) {
    INIT.call_once(|| init_fmt(environment));
}

fn init_fmt(environment: Environment) {
    const RUST_LOG: &str = "info";

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        eprintln!("RUST_LOG is unset, using default: '{RUST_LOG}'");
        EnvFilter::new(RUST_LOG)
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(environment == Environment::Development)
                .with_level(true)
                .compact(),
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("Error initializing logging: {:?}", err);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn environment_names() {
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!(
            Environment::from_str("production", false),
            Ok(Environment::Production)
        );
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn init_twice() {
        init_tracing(Environment::Production);
        init_tracing(Environment::Production);
        log::info!("still alive");
    }
}
