use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1_routes(config))
}

fn v1_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(route_routes())
        .merge(comment_routes())
        .merge(view_routes())
        .merge(media_routes(config))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::user::get_user,
            handlers::user::delete_user
        ))
        .routes(routes!(handlers::user::list_user_routes))
        .routes(routes!(handlers::user::list_user_comments))
}

fn route_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::route::list_routes,
            handlers::route::create_route
        ))
        .routes(routes!(
            handlers::route::get_route,
            handlers::route::delete_route
        ))
}

fn comment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::comment::list_route_comments,
            handlers::comment::create_comment,
            handlers::comment::delete_route_comments
        ))
        .routes(routes!(handlers::comment::delete_comment))
}

fn view_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::view::get_views,
        handlers::view::record_view,
        handlers::view::reset_views
    ))
}

fn media_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::track::download_track,
            handlers::track::upload_track,
            handlers::track::delete_track
        ))
        .routes(routes!(
            handlers::image::list_images,
            handlers::image::upload_images,
            handlers::image::delete_images
        ))
        .routes(routes!(
            handlers::image::download_image,
            handlers::image::delete_image
        ))
        .layer(handlers::track::media_body_limit(
            config.media.max_upload_size,
        ))
}
