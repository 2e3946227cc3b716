use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{error, info};

use campus::config::ServerConfig;
use campus::logging::init_tracing;
use campus::router::init_router;
use campus::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    let _guards = init_tracing(&server_config);

    let state = init_app_state(&server_config).await;
    if let Err(e) = campus_db::run_migrations(&state.db).await {
        error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let app = init_router(state);
    let addr = server_config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    info!(%addr, environment = ?server_config.environment, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
