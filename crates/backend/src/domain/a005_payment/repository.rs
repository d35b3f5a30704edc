use contracts::shared::filters::DateRange;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::shared::dates::range_bounds;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_payment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub centre_id: Option<i32>,
    /// "YYYY-MM-DD"
    pub payment_date: String,
    pub amount: f64,
    pub payment_mode: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Payments in range. With a centre filter, rows without a recorded centre
/// are kept as well; the caller resolves them through the student.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    centre_id: Option<i32>,
    range: Option<&DateRange>,
) -> anyhow::Result<Vec<Model>> {
    let mut query = Entity::find();
    if let Some(id) = centre_id {
        query = query.filter(
            Condition::any()
                .add(Column::CentreId.eq(id))
                .add(Column::CentreId.is_null()),
        );
    }
    if let Some(range) = range {
        let (from, to_exclusive) = range_bounds(range);
        query = query
            .filter(Column::PaymentDate.gte(from))
            .filter(Column::PaymentDate.lt(to_exclusive));
    }
    let items = query
        .order_by_asc(Column::PaymentDate)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(items)
}
