use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::health::health))
        .nest("/auth", auth_routes())
        .nest("/compile", compile_routes())
        .nest("/submissions", submission_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn compile_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::execute::run))
        .routes(routes!(handlers::execute::get_template))
        .routes(routes!(handlers::execute::get_mode))
        .routes(routes!(handlers::execute::get_shared))
}

fn submission_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::submission::my_submissions))
        .routes(routes!(
            handlers::submission::get_submission,
            handlers::submission::delete_submission
        ))
}
