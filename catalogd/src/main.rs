use clap::Parser;
use std::process::{ExitCode, Termination};

#[derive(clap::Parser, Debug)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "catalogd",
    long_about = None
)]
pub struct Catalogd {
    #[command(flatten)]
    pub run: catalog_server::Run,
}

impl Catalogd {
    async fn run(self) -> ExitCode {
        match self.run.run().await {
            Ok(code) => code,
            Err(err) => {
                // logging might not be initialized yet
                eprintln!("Error: {err}");
                log::error!("Error: {err}");
                for (n, err) in err.chain().skip(1).enumerate() {
                    if n == 0 {
                        log::error!("Caused by:");
                        eprintln!("Caused by:");
                    }
                    log::error!("\t{err}");
                    eprintln!("\t{err}");
                }

                ExitCode::FAILURE
            }
        }
    }
}

#[actix_web::main]
async fn main() -> impl Termination {
    Catalogd::parse().run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Catalogd::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Catalogd::try_parse_from([
            "catalogd",
            "--database-path",
            "/var/lib/catalog/catalog.db",
            "--port",
            "9090",
            "--env",
            "production",
        ])
        .unwrap();

        assert_eq!(
            cli.run.database.path,
            std::path::PathBuf::from("/var/lib/catalog/catalog.db")
        );
        assert_eq!(cli.run.http.port, 9090);
        assert_eq!(cli.run.env, catalog_server::Environment::Production);
    }
}
