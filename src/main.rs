//!
//! Multi-tenant SaaS administration backend.
//! Reads configuration from TOML file (~/.config/saas-admin/config.toml).

use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info};

use metrics_exporter_prometheus;
use saas_admin::application::{AuthService, CompanyService, PlanService, UserService};
use saas_admin::config::AppConfig;
use saas_admin::domain::RepositoryProvider;
use saas_admin::shared::shutdown::ShutdownCoordinator;
use saas_admin::{
    create_api_router, create_event_bus, default_config_path, spawn_subscription_bootstrap,
    InMemoryRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("SAAS_ADMIN_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting SaaS Admin Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Storage ────────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());

    // Create the bootstrap super-admin if no users exist
    bootstrap_super_admin(&repos, &app_cfg).await;

    // Event bus wiring; the listener finishes company signup by
    // activating the initial subscription
    let event_bus = create_event_bus();
    let _subscription_task = spawn_subscription_bootstrap(event_bus.clone(), repos.clone());
    info!("🔔 Event bus initialized, subscription bootstrap listener running");

    // ── Services ───────────────────────────────────────────────
    let token_ttl = Duration::hours(app_cfg.security.token_ttl_hours as i64);
    info!(
        "Session tokens expire after {}h",
        app_cfg.security.token_ttl_hours
    );
    let auth_service = Arc::new(AuthService::new(repos.clone(), token_ttl));
    let user_service = Arc::new(UserService::new(repos.clone()));
    let company_service = Arc::new(CompanyService::new(repos.clone(), event_bus.clone()));
    let plan_service = Arc::new(PlanService::new(repos.clone()));

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new();
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // Create REST API router
    let router = create_api_router(
        auth_service,
        user_service,
        company_service,
        plan_service,
        event_bus,
        prometheus_handle,
    );

    // Start REST API server with graceful shutdown
    let addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = serve_result {
        error!("REST API server error: {}", e);
    }

    info!("👋 SaaS Admin Service shutdown complete");
    Ok(())
}

/// Create the bootstrap super-admin if no users exist
async fn bootstrap_super_admin(repos: &Arc<dyn RepositoryProvider>, app_cfg: &AppConfig) {
    use saas_admin::domain::user::{Role, User};
    use saas_admin::domain::values::{Email, Name, PlainPassword};
    use saas_admin::infrastructure::crypto::password::hash_password;
    use saas_admin::shared::types::PaginationParams;

    let existing = match repos.users().find_all(PaginationParams::default()).await {
        Ok(page) => page.total,
        Err(e) => {
            error!("Failed to check existing users: {}", e);
            return;
        }
    };
    if existing > 0 {
        return;
    }

    info!("Creating bootstrap super-admin...");

    let name = match Name::parse(&app_cfg.admin.name) {
        Ok(name) => name,
        Err(e) => {
            error!("Invalid admin name in config: {}", e);
            return;
        }
    };
    let email = match Email::parse(&app_cfg.admin.email) {
        Ok(email) => email,
        Err(e) => {
            error!("Invalid admin email in config: {}", e);
            return;
        }
    };
    let password = match PlainPassword::parse(&app_cfg.admin.password) {
        Ok(password) => password,
        Err(e) => {
            error!("Invalid admin password in config: {}", e);
            return;
        }
    };

    let hashed = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = User::create(name, email, hashed, Role::SuperAdmin, None);
    match repos.users().save(admin).await {
        Ok(saved) => {
            info!("Bootstrap super-admin created: {}", saved.email.as_str());
            info!("⚠️  Please change the admin password immediately!");
        }
        Err(e) => {
            error!("Failed to create super-admin: {}", e);
        }
    }
}
