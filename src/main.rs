use std::str::FromStr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use autogo_storefront::config::EnvironmentConfig;
use autogo_storefront::create_app;
use autogo_storefront::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = tracing::Level::from_str(&config.log_level).unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 AutoGo - Storefront de alquiler de coches");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    info!("🔗 Backend: {}", config.api_base_url);

    let addr = config.server_url();
    let state = match AppState::from_config(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Error inicializando la aplicación: {}", e);
            return Err(anyhow::anyhow!("Error de inicialización: {}", e));
        }
    };
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🚙 Catálogo:");
    info!("   GET  /api/cars - Listar y filtrar vehículos");
    info!("   GET  /api/cars/:id - Obtener vehículo");
    info!("❤️ Lista de deseos:");
    info!("   GET|POST|DELETE /api/wishlist - Ver, añadir, vaciar");
    info!("   DELETE /api/wishlist/:id - Quitar vehículo");
    info!("📅 Reservas:");
    info!("   GET|PUT|DELETE /api/reservations/draft - Borrador");
    info!("   POST /api/reservations/quote - Presupuesto");
    info!("   POST /api/reservations/checkout - Preparar reserva");
    info!("   POST /api/reservations/confirm - Confirmar reserva");
    info!("   GET|DELETE /api/reservations/mine - Reservas locales");
    info!("🤖 POST /api/recommendations - Recomendaciones IA");
    info!("✉️ POST /api/contact - Mensaje de contacto");
    info!("🔐 POST /api/auth/login - Login admin");
    info!("🛠️ Admin (/api/admin, JWT):");
    info!("   POST /cars, PUT|DELETE /cars/:id, POST /media");
    info!("   GET /reservations, POST /reservations/refresh");
    info!("   PUT|DELETE /reservations/:id, PUT /reservations/:id/status");

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
