use std::path::PathBuf;

#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Database")]
#[group(id = "database")]
pub struct Database {
    /// Path of the database file, created if it doesn't exist yet
    #[arg(id = "database-path", long, env = "DATABASE_PATH")]
    pub path: PathBuf,
    #[arg(id = "db-max-conn", long, env = "DB_MAX_CONN", default_value_t = 10)]
    pub max_conn: u32,
    #[arg(id = "db-min-conn", long, env = "DB_MIN_CONN", default_value_t = 1)]
    pub min_conn: u32,
    /// Seconds to wait for establishing a connection
    #[arg(
        id = "db-connect-timeout",
        long,
        env = "DB_CONNECT_TIMEOUT",
        default_value_t = 8
    )]
    pub connect_timeout: u64,
    /// Seconds to wait for a connection from the pool
    #[arg(
        id = "db-acquire-timeout",
        long,
        env = "DB_ACQUIRE_TIMEOUT",
        default_value_t = 8
    )]
    pub acquire_timeout: u64,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_conn: 10,
            min_conn: 1,
            connect_timeout: 8,
            acquire_timeout: 8,
        }
    }

    pub fn to_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[derive(clap::Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        database: Database,
    }

    #[test]
    fn url() {
        let config = Database::new("/var/lib/catalog/catalog.db");
        assert_eq!(config.to_url(), "sqlite:///var/lib/catalog/catalog.db?mode=rwc");
    }

    #[test]
    fn path_is_required() {
        std::env::remove_var("DATABASE_PATH");
        assert!(Cli::try_parse_from(["test"]).is_err());

        let cli = Cli::try_parse_from(["test", "--database-path", "catalog.db"]).unwrap();
        assert_eq!(cli.database.path, PathBuf::from("catalog.db"));
        assert_eq!(cli.database.max_conn, 10);
    }
}
