use crate::app::{new_app, AppOptions};
use actix_cors::Cors;
use actix_web::{dev::Server, middleware::Logger, web, HttpServer};
use anyhow::Context;
use futures::future::select_all;
use std::{future::Future, net::TcpListener, pin::Pin, sync::Arc};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

#[derive(Clone, Debug, clap::Args)]
#[command(
    rename_all_env = "SCREAMING_SNAKE_CASE",
    next_help_heading = "HTTP endpoint"
)]
#[group(id = "http")]
pub struct HttpServerConfig {
    /// The number of worker threads, defaults to zero, which falls back to the number of cores.
    #[arg(
        id = "http-server-workers",
        long,
        env = "HTTP_SERVER_WORKERS",
        default_value_t = 0
    )]
    pub workers: usize,

    /// The address to listen on
    #[arg(long, env = "HOST", default_value_t = default::host())]
    pub host: String,

    /// The port to listen on
    #[arg(short, long, env = "PORT", default_value_t = default::PORT)]
    pub port: u16,

    /// Origin allowed to issue cross-origin requests, CORS is disabled if unset
    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,
}

mod default {
    pub const PORT: u16 = 8080;

    pub fn host() -> String {
        "127.0.0.1".to_string()
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            host: default::host(),
            port: default::PORT,
            cors_origin: None,
        }
    }
}

impl From<HttpServerConfig> for HttpServerBuilder {
    fn from(value: HttpServerConfig) -> Self {
        let mut result = HttpServerBuilder::new()
            .workers(value.workers)
            .bind(value.host, value.port);

        if let Some(origin) = value.cors_origin {
            log::info!("Allowing cross-origin requests from: {origin}");
            result = result.cors(move || {
                Cors::default()
                    .allowed_origin(&origin)
                    .allowed_methods(vec!["GET"])
                    .allow_any_header()
                    .max_age(3600)
            });
        }

        result
    }
}

pub type ConfiguratorFn = dyn Fn(&mut web::ServiceConfig) + Send + Sync;

pub struct HttpServerBuilder {
    configurator: Option<Arc<ConfiguratorFn>>,
    bind: Bind,
    cors_factory: Option<Arc<dyn Fn() -> Cors + Send + Sync>>,
    workers: usize,
}

pub enum Bind {
    /// Use the provided listener
    Listener(TcpListener),
    /// Bind to the provided host and port
    Address(String, u16),
}

impl Default for HttpServerBuilder {
    fn default() -> Self {
        HttpServerBuilder::new()
    }
}

impl HttpServerBuilder {
    pub fn new() -> Self {
        Self {
            configurator: None,
            bind: Bind::Address(default::host(), default::PORT),
            cors_factory: None,
            workers: 0,
        }
    }

    /// Set a CORS factory, by default CORS is disabled.
    pub fn cors<F>(mut self, cors_factory: F) -> Self
    where
        F: Fn() -> Cors + Send + Sync + 'static,
    {
        self.cors_factory = Some(Arc::new(cors_factory));
        self
    }

    pub fn configure<F>(mut self, configurator: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.configurator = Some(Arc::new(configurator));
        self
    }

    pub fn listen(mut self, listener: TcpListener) -> Self {
        self.bind = Bind::Listener(listener);
        self
    }

    pub fn bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.bind = Bind::Address(host.into(), port);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Bind the server, without starting to serve requests yet.
    ///
    /// The server doesn't handle any signals on its own, use [`Self::run`] or stop it through its
    /// handle.
    pub fn build(self) -> anyhow::Result<Server> {
        let configurator = self.configurator;
        let cors_factory = self.cors_factory;

        let mut http = HttpServer::new(move || {
            let cors = cors_factory.as_ref().map(|factory| factory());
            let configurator = configurator.clone();

            new_app(AppOptions {
                cors,
                logger: Some(Logger::default()),
            })
            .configure(move |svc| {
                if let Some(config) = &configurator {
                    config(svc);
                }
            })
        })
        .disable_signals();

        if self.workers > 0 {
            log::info!("Using {} worker(s)", self.workers);
            http = http.workers(self.workers);
        }

        http = match self.bind {
            Bind::Listener(listener) => {
                log::info!("Binding to provided listener: {listener:?}");
                http.listen(listener).context("Failed to listen")?
            }
            Bind::Address(host, port) => {
                log::info!("Binding to: {host}:{port}");
                http.bind((host, port))
                    .context("Failed to bind HTTP endpoint")?
            }
        };

        for (addr, scheme) in http.addrs_with_scheme() {
            log::info!("   {scheme}://{addr}");
        }

        Ok(http.run())
    }

    /// Serve requests until a termination signal arrives, then shut down gracefully.
    ///
    /// New connections are refused once the signal arrived, requests in flight are allowed to
    /// complete.
    pub async fn run(self) -> anyhow::Result<()> {
        let server = self.build()?;
        let handle = server.handle();

        let shutdown = actix_web::rt::spawn(async move {
            if let Err(err) = termination().await {
                log::warn!("Failed to wait for termination signal: {err}");
                return;
            }
            log::info!("Received termination signal, shutting down");
            handle.stop(true).await;
        });

        let result = server.await.context("Failed to run HTTP endpoint");
        shutdown.abort();

        result
    }
}

type Signal = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;

/// Resolves with the first of SIGINT or (on unix) SIGTERM.
async fn termination() -> anyhow::Result<()> {
    let sigint: Signal = Box::pin(async {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for SIGINT")
    });

    #[allow(unused_mut)]
    let mut signals = vec![sigint];

    #[cfg(unix)]
    {
        let sigterm: Signal = Box::pin(async {
            signal(SignalKind::terminate())
                .context("failed to listen for SIGTERM")?
                .recv()
                .await;
            Ok::<_, anyhow::Error>(())
        });
        signals.push(sigterm);
    }

    let (result, _index, _others) = select_all(signals).await;
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::HttpResponse;

    #[test]
    fn from_config() {
        let builder = HttpServerBuilder::from(HttpServerConfig {
            workers: 2,
            host: "0.0.0.0".into(),
            port: 9090,
            cors_origin: Some("https://catalog.example.com".into()),
        });

        assert_eq!(builder.workers, 2);
        assert!(builder.cors_factory.is_some());
        assert!(matches!(
            builder.bind,
            Bind::Address(ref host, 9090) if host == "0.0.0.0"
        ));
    }

    #[test]
    fn cors_disabled_by_default() {
        let builder = HttpServerBuilder::from(HttpServerConfig::default());
        assert!(builder.cors_factory.is_none());
    }

    #[actix_web::test]
    async fn stops_gracefully() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0")?;

        let server = HttpServerBuilder::new()
            .listen(listener)
            .workers(1)
            .configure(|svc| {
                svc.route("/", web::get().to(HttpResponse::Ok));
            })
            .build()?;

        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        handle.stop(true).await;
        running.await??;

        Ok(())
    }
}
