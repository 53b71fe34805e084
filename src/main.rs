use std::{net::SocketAddr, sync::Arc};

use mongodb::Client;
use tracing_subscriber::EnvFilter;

use nrxpay::{
    config::{self, StoreBackend},
    routes,
    services::{
        db_init, memory_store::MemoryStore, mongo_store::MongoStore, seen_popups::MemorySeenPopups,
        store::Store,
    },
    templates, AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nrxpay=info,tower_http=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let settings = config::load();

    let store: Arc<dyn Store> = match settings.store_backend {
        StoreBackend::Mongo => {
            let client = Client::with_uri_str(&settings.mongodb_uri)
                .await
                .expect("Failed to connect to MongoDB");
            let db = client.database(&settings.mongodb_db);

            if let Err(e) = db_init::ensure_indexes(&db).await {
                tracing::warn!("index setup failed: {}", e);
            }
            Arc::new(MongoStore::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(64);

    let state = AppState {
        hbs: templates::build_handlebars(),
        store,
        seen: Arc::new(MemorySeenPopups::new()),
        settings: settings.clone(),
        events_tx,
    };

    let app = routes::app(state);

    let ip = settings
        .host
        .parse::<std::net::IpAddr>()
        .expect("HOST must be an IP address");
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind listener");
    axum::serve(listener, app).await.expect("server error");
}
