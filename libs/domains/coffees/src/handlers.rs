use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    request_logger,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CoffeeResult;
use crate::models::{Coffee, CreateCoffee, Flavor, PaginationQuery, UpdateCoffee};
use crate::repository::CoffeeRepository;
use crate::service::CoffeeService;

pub const TAG: &str = "coffees";

/// OpenAPI documentation for Coffees API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_coffees,
        create_coffee,
        get_coffee,
        get_coffee_else,
        update_coffee,
        remove_coffee,
    ),
    components(
        schemas(Coffee, Flavor, CreateCoffee, UpdateCoffee),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Coffee catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the coffee router with all HTTP endpoints
pub fn router<R: CoffeeRepository + 'static>(service: CoffeeService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_coffees::<R>).post(create_coffee::<R>))
        .route(
            "/{id}",
            get(get_coffee::<R>)
                .patch(update_coffee::<R>)
                .delete(remove_coffee::<R>),
        )
        .route("/else/{id}", get(get_coffee_else::<R>))
        .layer(middleware::from_fn(request_logger))
        .with_state(shared_service)
}

/// List coffees
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of coffees ordered by id", body = Vec<Coffee>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_coffees<R: CoffeeRepository>(
    State(service): State<Arc<CoffeeService<R>>>,
    ValidatedQuery(pagination): ValidatedQuery<PaginationQuery>,
) -> CoffeeResult<Json<Vec<Coffee>>> {
    let coffees = service.find_all(pagination).await?;
    Ok(Json(coffees))
}

/// Create a coffee
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCoffee,
    responses(
        (status = 200, description = "Coffee created", body = Coffee),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_coffee<R: CoffeeRepository>(
    State(service): State<Arc<CoffeeService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCoffee>,
) -> CoffeeResult<Json<Coffee>> {
    let coffee = service.create(input).await?;
    Ok(Json(coffee))
}

/// Get a coffee by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Coffee ID")
    ),
    responses(
        (status = 200, description = "Coffee found", body = Coffee),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_coffee<R: CoffeeRepository>(
    State(service): State<Arc<CoffeeService<R>>>,
    IdPath(id): IdPath,
) -> CoffeeResult<Json<Coffee>> {
    let coffee = service.find_one(id).await?;
    Ok(Json(coffee))
}

/// Get a coffee by ID (alternate route)
#[utoipa::path(
    get,
    path = "/else/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Coffee ID")
    ),
    responses(
        (status = 200, description = "Coffee found", body = Coffee),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_coffee_else<R: CoffeeRepository>(
    state: State<Arc<CoffeeService<R>>>,
    id: IdPath,
) -> CoffeeResult<Json<Coffee>> {
    get_coffee(state, id).await
}

/// Partially update a coffee
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Coffee ID")
    ),
    request_body = UpdateCoffee,
    responses(
        (status = 200, description = "Coffee updated", body = Coffee),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_coffee<R: CoffeeRepository>(
    State(service): State<Arc<CoffeeService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCoffee>,
) -> CoffeeResult<Json<Coffee>> {
    let coffee = service.update(id, input).await?;
    Ok(Json(coffee))
}

/// Delete a coffee
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Coffee ID")
    ),
    responses(
        (status = 200, description = "Coffee removed, or was already absent"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_coffee<R: CoffeeRepository>(
    State(service): State<Arc<CoffeeService<R>>>,
    IdPath(id): IdPath,
) -> CoffeeResult<StatusCode> {
    service.remove(id).await?;
    Ok(StatusCode::OK)
}
