use axum::{
    routing::{get, post},
    Router,
};
use gamideck_core::{Repository, StudyContext};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::routes::{self, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/decks", get(routes::list_decks))
        .route("/sessions", post(routes::create_session))
        .route("/sessions/:id", get(routes::get_session).delete(routes::delete_session))
        .route("/sessions/:id/reveal", post(routes::reveal))
        .route("/sessions/:id/rate", post(routes::rate))
        .route("/sessions/:id/restart", post(routes::restart))
        .route("/spin", post(routes::spin))
        .route("/leaderboard", get(routes::leaderboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(repo: Arc<dyn Repository>, ctx: StudyContext, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState::new(repo, ctx)));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "api listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
