use anyhow::Context;
use catalog_common::{config::Database, db};
use catalog_infrastructure::{
    app::http::{HttpServerBuilder, HttpServerConfig},
    tracing::init_tracing,
};
use std::process::ExitCode;

pub use catalog_infrastructure::Environment;

/// Run the API server
#[derive(clap::Args, Debug, Clone)]
pub struct Run {
    /// The kind of environment, controls the log output
    #[arg(long, env = "ENV", value_enum, default_value_t = Environment::Development)]
    pub env: Environment,

    // flattened commands must go last
    //
    /// Database configuration
    #[command(flatten)]
    pub database: Database,

    #[command(flatten)]
    pub http: HttpServerConfig,
}

struct InitData {
    db: db::Database,
    http: HttpServerConfig,
}

impl Run {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        init_tracing(self.env);
        log::info!("Starting up in {} mode", self.env);

        InitData::new(self).await?.run().await?;

        log::info!("Shut down");

        Ok(ExitCode::SUCCESS)
    }
}

impl InitData {
    async fn new(run: Run) -> anyhow::Result<Self> {
        let db = db::Database::new(&run.database).await?;

        db.migrate()
            .await
            .context("failed to migrate the database")?;

        Ok(InitData { db, http: run.http })
    }

    fn server(&self) -> HttpServerBuilder {
        let db = self.db.clone();

        HttpServerBuilder::from(self.http.clone())
            .configure(move |svc| catalog_module_fundamental::configure(svc, db.clone()))
    }

    /// Serve until terminated, the database is closed after the server stopped.
    async fn run(self) -> anyhow::Result<()> {
        let result = self.server().run().await;

        self.db.close().await?;

        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sea_orm::ConnectionTrait;
    use std::net::TcpListener;
    use test_log::test;

    fn config(path: &std::path::Path) -> Run {
        Run {
            env: Environment::Development,
            database: Database::new(path.join("catalog.db")),
            http: HttpServerConfig::default(),
        }
    }

    #[test(actix_web::test)]
    async fn startup_and_shutdown() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let init = InitData::new(config(dir.path())).await?;

        let server = init
            .server()
            .listen(TcpListener::bind("127.0.0.1:0")?)
            .workers(1)
            .build()?;
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        handle.stop(true).await;
        running.await??;

        init.db.close().await?;

        Ok(())
    }

    #[test(actix_web::test)]
    async fn migration_failure_is_fatal() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let run = config(dir.path());

        // a populated table sqlite can't extend with the required columns
        let db = db::Database::new(&run.database).await?;
        db.execute_unprepared("CREATE TABLE nodes (id TEXT NOT NULL PRIMARY KEY)").await?;
        db.execute_unprepared("INSERT INTO nodes (id) VALUES ('n1')").await?;
        db.close().await?;

        let result = InitData::new(run).await;
        let err = result.err().ok_or_else(|| anyhow::anyhow!("startup must fail"))?;
        assert_eq!(err.to_string(), "failed to migrate the database");

        Ok(())
    }
}
