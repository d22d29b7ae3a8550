use produtos_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::products::CreateProductRequest,
    error::AppError,
    services::product_service,
    state::AppState,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, config.max_connections).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let state = AppState::new(orm);
    seed_products(&state).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_products(state: &AppState) -> anyhow::Result<()> {
    let products = vec![
        ("Smartphone Samsung Galaxy S21", 350000, 50, "9876543210987"),
        ("Smartphone Samsung Galaxy S22", 450000, 30, "1234567890123"),
        ("Fone de Ouvido Bluetooth", 29990, 120, "7891234567890"),
        ("Mouse Sem Fio", 5000, 200, "7890987654321"),
    ];

    for (name, cents, stock, barcode) in products {
        let request = CreateProductRequest {
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            stock_quantity: stock,
            barcode: Some(barcode.to_string()),
            unit_of_measure: Some("unidade".to_string()),
        };
        match product_service::create_product(state, request).await {
            Ok(product) => println!("Seeded {} (id={})", product.name, product.id),
            // Barcodes are unique, so a rerun finds them already present.
            Err(AppError::DuplicateBarcode) => println!("Skipped {name}: already seeded"),
            Err(err) => return Err(anyhow::anyhow!(err)),
        }
    }

    Ok(())
}
