use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde_json::Value;

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    error::{AppError, AppResult},
    models::Product,
    response::{BadRequestBody, ErrorResponse, MessageResponse},
    routes::params::PriceRangeQuery,
    services::product_service,
    state::AppState,
};

const NO_PRODUCT_WITH_NAME: &str = "Nenhum produto encontrado com este nome.";
const NO_PRODUCT_IN_RANGE: &str = "Nenhum produto encontrado nesta faixa de preço.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/produtos", get(list_products).post(create_product))
        .route("/produtos/", get(list_products).post(create_product))
        .route(
            "/produtos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/produtos/nome/{name}", get(find_by_name))
        .route("/produtos/preco", get(find_by_price_range))
}

// A non-numeric id never names a product.
fn product_id(id: Result<Path<i32>, PathRejection>) -> AppResult<i32> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::product_not_found())
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> AppResult<Value> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/produtos",
    responses(
        (status = 200, description = "List every product", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::list_products(&state).await?;
    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/produtos",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Field error map, or duplicate barcode message", body = BadRequestBody)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let payload = json_body(payload)?;
    let request = state
        .schema
        .load_create(&payload)
        .map_err(AppError::Validation)?;
    let product = product_service::create_product(&state, request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/produtos/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Product>> {
    let id = product_id(id)?;
    let product = product_service::get_product(&state, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/produtos/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Field error map, or duplicate barcode message", body = BadRequestBody),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let id = product_id(id)?;
    let payload = json_body(payload)?;
    let patch = state
        .schema
        .load_update(&payload)
        .map_err(AppError::Validation)?;
    let product = product_service::update_product(&state, id, patch).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/produtos/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product", body = MessageResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let id = product_id(id)?;
    product_service::delete_product(&state, id).await?;
    Ok(Json(MessageResponse::new("Produto deletado com sucesso.")))
}

#[utoipa::path(
    get,
    path = "/produtos/nome/{name}",
    params(
        ("name" = String, Path, description = "Fragment the product name must contain")
    ),
    responses(
        (status = 200, description = "Products whose name contains the fragment", body = Vec<Product>),
        (status = 404, description = "No product matched", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn find_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::find_by_name(&state, &name).await?;
    if products.is_empty() {
        return Err(AppError::NotFound(NO_PRODUCT_WITH_NAME.to_string()));
    }
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/produtos/preco",
    params(
        ("min_preco" = Option<f64>, Query, description = "Minimum price, inclusive", example = 1000),
        ("max_preco" = Option<f64>, Query, description = "Maximum price, inclusive", example = 3000),
    ),
    responses(
        (status = 200, description = "Products within the price range", body = Vec<Product>),
        (status = 404, description = "No product in range", body = ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn find_by_price_range(
    State(state): State<AppState>,
    Query(query): Query<PriceRangeQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = product_service::find_by_price_range(&state, query.bounds()).await?;
    if products.is_empty() {
        return Err(AppError::NotFound(NO_PRODUCT_IN_RANGE.to_string()));
    }
    Ok(Json(products))
}
