use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{
    web,
    App,
    HttpServer,
};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;

use crate::app::configuration::{
    AllowedOrigins,
    ApplicationSettings,
    DatabaseSettings,
    Settings,
    StoreBackend,
};
use crate::domain::ServiceName;
use crate::routes::*;
use crate::store::{
    DocumentStore,
    InMemoryStore,
    PostgresStore,
    StoreError,
};

/// The running service: the HTTP server plus the storage handle it owns.
///
/// The store is released once the server future completes, see
/// [`DekapletApp::run_until_stopped`].
pub struct DekapletApp {
    server: Server,
    port: u16,
    store: Arc<dyn DocumentStore>,
}

impl DekapletApp {
    pub async fn from(configuration: Settings) -> Result<DekapletApp, anyhow::Error> {
        let store = document_store(&configuration.database)
            .await
            .with_context(|| {
                format!(
                    "error creating the document store from config: {:?}",
                    configuration.database
                )
            })?;
        DekapletApp::with_store(configuration.application, store)
            .context("error starting the http server")
    }

    pub fn with_store(
        application: ApplicationSettings,
        store: Arc<dyn DocumentStore>,
    ) -> Result<DekapletApp, anyhow::Error> {
        let allowed_origins = application.allowed_origins()?;
        let tcp_listener = TcpListener::bind(application.binding_address())?;
        let port = tcp_listener.local_addr()?.port();
        let store_data: web::Data<dyn DocumentStore> = web::Data::from(store.clone());
        let service_name = web::Data::new(ServiceName(application.service_name.clone()));

        // HttpServer handles all transport level concerns
        let server = HttpServer::new(move || {
            // App is where all the application logic lives: routing, middlewares, request
            // handlers, etc.
            App::new()
                .wrap(cors(&allowed_origins))
                .wrap(TracingLogger::default())
                .app_data(json_config())
                .app_data(query_config())
                // the closure is called once per worker (it is of type Fn, not FnOnce),
                // so every worker gets its own handle to the same store
                .app_data(store_data.clone())
                .app_data(service_name.clone())
                .service(
                    web::scope("/api")
                        .route("/", web::get().to(root))
                        .route("/health", web::get().to(health_check))
                        .route("/status", web::post().to(create_status_check))
                        .route("/status", web::get().to(get_status_checks))
                        .route("/contact", web::post().to(submit_contact_form))
                        .route("/contact", web::get().to(get_contact_forms))
                        .route("/contact/{id}", web::get().to(get_contact_form))
                        .route("/newsletter", web::post().to(subscribe_newsletter))
                        .route("/newsletter", web::get().to(get_newsletter_subscriptions)),
                )
        })
        .backlog(application.max_pending_connections)
        .listen(tcp_listener)?
        .run();

        Ok(DekapletApp {
            server,
            port,
            store,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until the server is stopped, then close the store.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let result = self.server.await;
        self.store.close().await;
        result
    }
}

/// Build the storage backend selected by `database.backend`.
///
/// The Postgres backend runs the pending migrations before it is handed out.
pub async fn document_store(
    database_config: &DatabaseSettings,
) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match database_config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryStore::new())),
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .acquire_timeout(Duration::from_secs(
                    database_config.connect_timeout_seconds,
                ))
                .max_connections(database_config.max_db_connections)
                .connect_with(database_config.connection_options()?)
                .await?;
            let store = PostgresStore::new(pool);
            store.migrate().await?;
            Ok(Arc::new(store))
        }
    }
}

fn cors(allowed_origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials();
    match allowed_origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}
