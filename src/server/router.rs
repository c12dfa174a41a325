//! HTTP routing and OpenAPI documentation configuration.
//!
//! Public routes (login, register, logout and health) are mounted without middleware. Every
//! other route sits behind [`require_user`], which answers 401 before the handler runs
//! when the `user_session` cookie does not resolve to a user. The OpenAPI document is
//! served at `/api/docs/openapi.json` with Swagger UI at `/api/docs`.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller,
    middleware::auth::require_user,
    model::app::AppState,
};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
pub fn routes(state: AppState) -> Router {
    #[derive(OpenApi)]
    #[openapi(info(title = "Finanapp", description = "Finanapp API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Session lifecycle"),
        (name = controller::user::USER_TAG, description = "Dashboard and profile"),
        (name = controller::asset::ASSET_TAG, description = "Assets and their taxes"),
        (name = controller::income::INCOME_TAG, description = "Incomes and their taxes"),
        (name = controller::expense::EXPENSE_TAG, description = "Expenses"),
        (name = controller::tax::TAX_TAG, description = "User defined taxes"),
        (name = controller::category::CATEGORY_TAG, description = "Reference data and user categories"),
        (name = controller::group::GROUP_TAG, description = "Groups, shared items and invites"),
        (name = controller::health::HEALTH_TAG, description = "Liveness"),
    ))]
    struct ApiDoc;

    let public = OpenApiRouter::new()
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::health::health));

    let protected = OpenApiRouter::new()
        .routes(routes!(controller::auth::auth_status))
        .routes(routes!(controller::user::get_user))
        .routes(routes!(controller::user::edit_user))
        .routes(routes!(
            controller::asset::list_assets,
            controller::asset::create_asset
        ))
        .routes(routes!(
            controller::asset::get_asset,
            controller::asset::update_asset,
            controller::asset::delete_asset
        ))
        .routes(routes!(
            controller::income::list_incomes,
            controller::income::create_income
        ))
        .routes(routes!(
            controller::income::get_income,
            controller::income::update_income,
            controller::income::delete_income
        ))
        .routes(routes!(controller::income::attach_income_tax))
        .routes(routes!(controller::income::detach_income_tax))
        .routes(routes!(
            controller::expense::list_expenses,
            controller::expense::create_expense
        ))
        .routes(routes!(
            controller::expense::get_expense,
            controller::expense::update_expense,
            controller::expense::delete_expense
        ))
        .routes(routes!(controller::tax::list_taxes, controller::tax::create_tax))
        .routes(routes!(controller::tax::update_tax, controller::tax::delete_tax))
        .routes(routes!(
            controller::category::list_categories,
            controller::category::create_category
        ))
        .routes(routes!(controller::category::delete_category))
        .routes(routes!(
            controller::group::list_groups,
            controller::group::create_group
        ))
        .routes(routes!(controller::group::delete_group))
        .routes(routes!(controller::group::attach_group_item))
        .routes(routes!(controller::group::detach_group_item))
        .routes(routes!(controller::group::invite_to_group))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(public)
        .merge(protected)
        .split_for_parts();

    routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .with_state(state)
}
