use chrono::Utc;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    ActiveValue::NotSet,
};
use sea_orm::sea_query::{Expr, LikeExpr};

use crate::{
    dto::products::{CreateProductRequest, PriceRange, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products},
    error::{AppError, AppResult},
    models::Product,
    state::AppState,
};

const CREATE_FAILED: &str = "Erro ao cadastrar o produto";
const UPDATE_FAILED: &str = "Erro ao atualizar o produto";

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let models = Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?;
    Ok(state.schema.dump_many(models))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<Product> {
    let result = Products::find_by_id(id).one(&state.orm).await?;
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::product_not_found()),
    };
    Ok(state.schema.dump(result))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    let now = Utc::now();
    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        price_cents: Set(to_cents(payload.price)?),
        stock_quantity: Set(payload.stock_quantity),
        barcode: Set(payload.barcode),
        unit_of_measure: Set(payload.unit_of_measure),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let product = active
        .insert(&state.orm)
        .await
        .map_err(|err| AppError::from_write(err, CREATE_FAILED))?;

    tracing::info!(product_id = product.id, "product created");
    Ok(state.schema.dump(product))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<Product> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::product_not_found()),
    };

    let last_update = existing.updated_at;
    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price_cents = Set(to_cents(price)?);
    }
    if let Some(stock_quantity) = payload.stock_quantity {
        active.stock_quantity = Set(stock_quantity);
    }
    if let Some(barcode) = payload.barcode {
        active.barcode = Set(barcode);
    }
    if let Some(unit_of_measure) = payload.unit_of_measure {
        active.unit_of_measure = Set(unit_of_measure);
    }
    // Never move backwards, even if the wall clock does.
    active.updated_at = Set(Utc::now().max(last_update));

    let product = active
        .update(&state.orm)
        .await
        .map_err(update_error)?;

    tracing::info!(product_id = product.id, "product updated");
    Ok(state.schema.dump(product))
}

pub async fn delete_product(state: &AppState, id: i32) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::product_not_found());
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(())
}

/// Products whose name contains `fragment` as literal text, compared the way
/// the backend's `LIKE` does.
pub async fn find_by_name(state: &AppState, fragment: &str) -> AppResult<Vec<Product>> {
    let pattern = LikeExpr::new(format!("%{}%", escape_like(fragment))).escape('\\');
    let models = Products::find()
        .filter(Expr::col(Column::Name).like(pattern))
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?;
    Ok(state.schema.dump_many(models))
}

pub async fn find_by_price_range(state: &AppState, range: PriceRange) -> AppResult<Vec<Product>> {
    let mut condition = Condition::all();

    if let Some(min) = range.min {
        condition = condition.add(Column::PriceCents.gte(bound_in_cents(min, true)));
    }

    if let Some(max) = range.max {
        condition = condition.add(Column::PriceCents.lte(bound_in_cents(max, false)));
    }

    let models = Products::find()
        .filter(condition)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?;
    Ok(state.schema.dump_many(models))
}

// The row can vanish between the lookup and the write.
fn update_error(err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotUpdated => AppError::product_not_found(),
        other => AppError::from_write(other, UPDATE_FAILED),
    }
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_cents(price: Decimal) -> AppResult<i64> {
    price
        .round_dp(2)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| AppError::BadRequest(format!("price out of range: {price}")))
}

/// Scale a bound to whole cents, rounding towards the inside of the range.
fn bound_in_cents(value: Decimal, round_up: bool) -> i64 {
    let saturated = if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| if round_up { scaled.ceil() } else { scaled.floor() })
        .and_then(|whole| whole.to_i64())
        .unwrap_or(saturated)
}
