use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::handlers::admin::{admin_page, delete_player_form, view_player};
use crate::handlers::http::{delete_player, get_player, list_players, put_player};
use crate::handlers::AppState;
use crate::store::SharedStore;

/// Build the full application router. One route set, mounted at the root and
/// again under /debug; the two trees share the same store.
pub fn app(store: SharedStore) -> Router {
    Router::new()
        .merge(routes("", store.clone()))
        .nest("/debug", routes("/debug", store))
        .layer(CorsLayer::permissive())
}

fn routes(prefix: &'static str, store: SharedStore) -> Router {
    Router::new()
        .route("/", get(admin_page))
        .route("/players", get(list_players))
        .route(
            "/players/:key",
            get(get_player).put(put_player).delete(delete_player),
        )
        .route("/players/:key/view", get(view_player))
        .route("/players/:key/delete", post(delete_player_form))
        .with_state(AppState { store, prefix })
}

pub async fn start(config: &Config, store: SharedStore) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.http_addr();
    log::info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("HTTP server successfully bound to {}", addr);

    axum::serve(listener, app(store)).await?;
    Ok(())
}
