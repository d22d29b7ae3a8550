use axum::Json;
use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    models::Product,
    response::{BadRequestBody, ErrorResponse, MessageResponse},
    routes::{health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gerenciador de Produtos",
        description = "API para gerenciamento de produtos: criar, atualizar, listar, buscar e deletar produtos."
    ),
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::find_by_name,
        products::find_by_price_range
    ),
    components(
        schemas(
            Product,
            CreateProductRequest,
            UpdateProductRequest,
            params::PriceRangeQuery,
            MessageResponse,
            ErrorResponse,
            BadRequestBody,
            health::HealthData
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Operações relacionadas a produtos"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/api/docs", ApiDoc::openapi())
}

pub async fn openapi_json() -> Json<OpenApiSpec> {
    Json(ApiDoc::openapi())
}
