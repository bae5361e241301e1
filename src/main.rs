// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use medcode_client::api::admin::AdminApi;
use medcode_client::api::auth::AuthApi;
use medcode_client::api::student::StudentApi;
use medcode_client::config::Config;
use medcode_client::flow::question_panel;
use medcode_client::gateway::Gateway;
use medcode_client::guard::{GuardState, Navigator, Route, RouteGuard};
use medcode_client::models::user::Role;
use medcode_client::session::policy::SessionPolicy;
use medcode_client::session::store::SessionStore;
use medcode_client::session::validator::{SessionValidator, ValidationClient};

/// Terminal stand-in for browser navigation: redirects are logged, not
/// rendered.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn replace(&self, route: Route) {
        tracing::info!("Navigating to {:?}", route);
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "client.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tracing::info!("Backend origin: {}", config.api_base_url);

    // Session context, transport, API surfaces
    let store = Arc::new(match &config.session_file {
        Some(path) => SessionStore::with_backing(path.clone()),
        None => SessionStore::in_memory(),
    });
    let gateway = Arc::new(
        Gateway::new(&config, Arc::clone(&store)).expect("Failed to build HTTP client"),
    );
    let auth = Arc::new(AuthApi::new(Arc::clone(&gateway)));

    // Session validator + the single invalidation policy
    let validator = SessionValidator::new(
        Arc::clone(&auth) as Arc<dyn ValidationClient>,
        Arc::clone(&store),
    );
    let navigator: Arc<dyn Navigator> = Arc::new(LogNavigator);
    let _policy = SessionPolicy::spawn(
        gateway.auth_events(),
        validator.state(),
        Arc::clone(&store),
        Arc::clone(&navigator),
    );

    // Log in with the demo credentials
    let username = std::env::var("MEDCODE_USERNAME").expect("MEDCODE_USERNAME must be set");
    let password = std::env::var("MEDCODE_PASSWORD").expect("MEDCODE_PASSWORD must be set");

    let session = match auth.login(&username, &password).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            return;
        }
    };

    // Kick off the validation timer and wait for the guard to settle
    let _timer = validator.start(config.validate_interval);
    let mut guard = RouteGuard::new(&validator, Arc::clone(&store));

    match guard.resolve(None).await {
        GuardState::Allow(user) => {
            tracing::info!("Session valid for {} ({:?})", user.name, user.role)
        }
        GuardState::Redirect(route) => {
            tracing::warn!("Redirected to {:?}", route);
            return;
        }
        GuardState::Loading => unreachable!("resolve never yields Loading"),
    }

    // Role-appropriate dashboard summary
    match session.user.role {
        Role::Admin | Role::Subadmin => {
            let admin = AdminApi::new(Arc::clone(&gateway));
            match admin.dashboard().await {
                Ok(stats) => tracing::info!(
                    "Dashboard: {} students, {} assignments, {} submissions",
                    stats.total_students,
                    stats.total_assignments,
                    stats.total_submissions
                ),
                Err(e) => tracing::error!("Failed to load dashboard: {}", e),
            }
        }
        Role::User => {
            let student = StudentApi::new(Arc::clone(&gateway));
            match student.assignments(&session.user.id).await {
                Ok(assignments) => {
                    tracing::info!("{} assigned module(s)", assignments.len());
                    for assignment in &assignments {
                        tracing::info!(
                            "{}\n{}",
                            assignment.module_name,
                            question_panel(&assignment.questions)
                        );
                    }
                }
                Err(e) => tracing::error!("Failed to load assignments: {}", e),
            }
        }
    }

    if let Err(e) = auth.logout().await {
        tracing::warn!("Logout call failed: {}", e);
    }
}
