//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    handler::Handler,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::events::SharedEventBus;
use crate::application::{AuthService, CompanyService, PlanService, UserService};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::interfaces::http::middleware::{
    admin_level_middleware, auth_middleware, super_admin_middleware, AuthState,
};
use crate::interfaces::http::modules::metrics::http_metrics_middleware;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, companies, health, metrics, plans, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Opaque session token issued by /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::logout_all,
        auth::handlers::refresh,
        auth::handlers::me,
        // Companies
        companies::handlers::create_company,
        companies::handlers::list_companies,
        companies::handlers::get_company,
        companies::handlers::update_company,
        companies::handlers::delete_company,
        companies::handlers::restore_company,
        companies::handlers::change_plan,
        companies::handlers::list_subscriptions,
        // Users
        users::handlers::list_users,
        users::handlers::create_user,
        users::handlers::get_user,
        users::handlers::update_user,
        users::handlers::delete_user,
        users::handlers::restore_user,
        // Plans
        plans::handlers::list_plans,
        plans::handlers::create_plan,
        plans::handlers::get_plan,
        plans::handlers::update_plan,
        plans::handlers::delete_plan,
        plans::handlers::restore_plan,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<users::dto::UserDto>,
            PaginatedResponse<companies::dto::CompanyDto>,
            PaginatedResponse<companies::dto::SubscriptionDto>,
            PaginatedResponse<plans::dto::PlanDto>,
            PaginationQuery,
            // Health
            health::HealthResponse,
            // Auth
            auth::dto::LoginRequest,
            auth::dto::SessionResponse,
            auth::dto::AccountInfo,
            auth::dto::RevokedSessions,
            // Companies
            companies::dto::CompanyDto,
            companies::dto::SubscriptionDto,
            companies::dto::CreatedCompanyResponse,
            companies::dto::CreateCompanyRequest,
            companies::dto::UpdateCompanyRequest,
            companies::dto::ChangePlanRequest,
            // Users
            users::dto::UserDto,
            users::dto::CreateUserRequest,
            users::dto::UpdateUserRequest,
            // Plans
            plans::dto::PlanDto,
            plans::dto::CreatePlanRequest,
            plans::dto::UpdatePlanRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Session management: login, logout, token refresh"),
        (name = "Companies", description = "Tenant registration, lifecycle and subscriptions"),
        (name = "Users", description = "Per-company user provisioning and management"),
        (name = "Plans", description = "Subscription plan management (super-admin)"),
    ),
    info(
        title = "SaaS Admin Service API",
        version = "1.0.0",
        description = "REST API for multi-tenant company, user and subscription administration",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    auth_service: Arc<AuthService>,
    user_service: Arc<UserService>,
    company_service: Arc<CompanyService>,
    plan_service: Arc<PlanService>,
    event_bus: SharedEventBus,
    metrics_handle: PrometheusHandle,
) -> Router {
    let middleware_state = AuthState {
        auth: auth_service.clone(),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_handler_state = auth::AuthHandlerState { auth: auth_service };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::handlers::login))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/logout", post(auth::handlers::logout))
        .route("/logout-all", post(auth::handlers::logout_all))
        .route("/refresh", post(auth::handlers::refresh))
        .route("/me", get(auth::handlers::me))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_handler_state);

    // Company routes. Signup (POST /) is the one public write in the API and
    // shares its path with the authenticated collection GET, so the auth
    // layer wraps that single handler instead of the router.
    let company_state = companies::CompanyHandlerState {
        companies: company_service,
    };
    let company_routes = Router::new()
        .route(
            "/{id}",
            get(companies::handlers::get_company)
                .put(companies::handlers::update_company)
                .delete(companies::handlers::delete_company),
        )
        .route("/{id}/restore", post(companies::handlers::restore_company))
        .route("/{id}/change-plan", post(companies::handlers::change_plan))
        .route(
            "/{id}/subscriptions",
            get(companies::handlers::list_subscriptions),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        // added after the layer: stays public
        .route(
            "/",
            post(companies::handlers::create_company).get(
                companies::handlers::list_companies.layer(middleware::from_fn_with_state(
                    middleware_state.clone(),
                    auth_middleware,
                )),
            ),
        )
        .with_state(company_state);

    // User routes (admin level; per-record tenancy inside the service)
    let user_routes = Router::new()
        .route(
            "/",
            get(users::handlers::list_users).post(users::handlers::create_user),
        )
        .route(
            "/{id}",
            get(users::handlers::get_user)
                .put(users::handlers::update_user)
                .delete(users::handlers::delete_user),
        )
        .route("/{id}/restore", post(users::handlers::restore_user))
        // gates run inside-out: auth resolves the principal, the role gate
        // reads it from extensions
        .layer(middleware::from_fn(admin_level_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(users::UserHandlerState {
            users: user_service,
        });

    // Plan routes (super-admin only)
    let plan_routes = Router::new()
        .route(
            "/",
            get(plans::handlers::list_plans).post(plans::handlers::create_plan),
        )
        .route(
            "/{id}",
            get(plans::handlers::get_plan)
                .put(plans::handlers::update_plan)
                .delete(plans::handlers::delete_plan),
        )
        .route("/{id}/restore", post(plans::handlers::restore_plan))
        .layer(middleware::from_fn(super_admin_middleware))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(plans::PlanHandlerState {
            plans: plan_service,
        });

    let health_state = health::HealthState {
        event_bus,
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = metrics::MetricsState {
        handle: metrics_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .route("/health", get(health::health_check).with_state(health_state))
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics_state),
        )
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Companies
        .nest("/api/v1/companies", company_routes)
        // Users
        .nest("/api/v1/users", user_routes)
        // Plans
        .nest("/api/v1/plans", plan_routes)
        // Middleware. route_layer for the metrics: it must run after routing
        // so the path label is the route template, not the raw URI.
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
