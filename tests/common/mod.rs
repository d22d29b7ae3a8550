use produtos_api::{
    db::{create_orm_conn, run_migrations},
    dto::products::CreateProductRequest,
    state::AppState,
};
use rust_decimal::Decimal;

// Every test gets its own in-memory database; one connection keeps it alive.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:", 1).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}

#[allow(dead_code)]
pub fn new_product(name: &str, cents: i64, barcode: Option<&str>) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        stock_quantity: 10,
        barcode: barcode.map(str::to_owned),
        unit_of_measure: Some("unidade".to_string()),
    }
}
