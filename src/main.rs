use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod canvas;
mod config;
mod handlers;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up CANVAS_GATEWAY_PORT etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!(
        "starting Canvas gateway (upstream concurrency {}, timeout {}s)",
        config.upstream.concurrency,
        config.upstream.timeout_secs
    );

    let app = app();

    // Allow tests or deployments to override port via env
    let port = config.server.port;
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Canvas gateway listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Service meta
        .route("/", get(root))
        .route("/health", get(health))
        // Forwarding shims over the Canvas API
        .merge(course_routes())
        // Aggregation and stubs
        .merge(derived_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn course_routes() -> Router {
    use handlers::{announcements, assignments, courses, files, grades, modules};

    Router::new()
        .route("/courses", get(courses::list))
        .route("/courses/:course_id", get(courses::show))
        .route("/courses/:course_id/assignments", get(assignments::list))
        .route(
            "/courses/:course_id/assignments/:assignment_id",
            get(assignments::show),
        )
        .route("/courses/:course_id/modules", get(modules::list))
        .route(
            "/courses/:course_id/modules/:module_id/items",
            get(modules::items),
        )
        .route("/courses/:course_id/files", get(files::list))
        .route("/courses/:course_id/announcements", get(announcements::list))
        .route("/courses/:course_id/grades", get(grades::show))
}

fn derived_routes() -> Router {
    use handlers::{missing, study_guide};

    Router::new()
        .route("/missing_assignments", get(missing::list))
        .route("/generate_study_guide", post(study_guide::generate))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Canvas Gateway (Rust)",
            "version": version,
            "description": "Pass-through REST gateway over the Canvas LMS API",
            "endpoints": {
                "courses": "/courses, /courses/:course_id",
                "assignments": "/courses/:course_id/assignments[/:assignment_id]",
                "modules": "/courses/:course_id/modules[/:module_id/items]",
                "files": "/courses/:course_id/files",
                "announcements": "/courses/:course_id/announcements",
                "grades": "/courses/:course_id/grades",
                "missing_assignments": "/missing_assignments",
                "study_guide": "/generate_study_guide (stub)",
            },
            "notes": "every endpoint requires institute_url and token query parameters"
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    // Stateless service: nothing to probe beyond the process itself.
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now()
        }
    }))
}
