mod health;

use std::net::SocketAddr;

use axum::Router;
use solace_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Capabilities are mounted only when their config section is present;
    /// a configured section with a missing secret has already failed
    /// validation at load time.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured capability fails to initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Chat + transcription share the generative backend
        if config.generation.is_some() {
            let chat_state = solace_chat::build_state(config)?;
            app = app.merge(solace_chat::endpoint_router().with_state(chat_state));

            let transcribe_state = solace_transcribe::build_state(config)?;
            app = app.merge(solace_transcribe::endpoint_router().with_state(transcribe_state));
        }

        // Speech synthesis, plus static serving of the files it writes
        if config.speech.is_some() {
            let speech_state = solace_speech::build_state(config)?;
            let audio_dir = speech_state.output_dir().to_path_buf();

            app = app.merge(solace_speech::endpoint_router().with_state(speech_state));
            app = app.nest_service("/audio", tower_http::services::ServeDir::new(audio_dir));
        }

        // Uploads
        if config.uploads.is_some() {
            let upload_state = solace_upload::build_state(config);
            app = app.merge(solace_upload::endpoint_router().with_state(upload_state));
        }

        // Payments and webhooks
        if config.payments.is_some() {
            let payment_state = solace_payments::build_state(config)?;
            app = app.merge(solace_payments::endpoint_router().with_state(payment_state));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
