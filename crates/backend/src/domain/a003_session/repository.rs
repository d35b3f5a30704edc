use contracts::shared::filters::DateRange;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::shared::dates::range_bounds;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub centre_id: i32,
    pub coach_id: Option<i32>,
    /// "YYYY-MM-DD"
    pub session_date: String,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    centre_id: Option<i32>,
    range: Option<&DateRange>,
) -> anyhow::Result<Vec<Model>> {
    let mut query = Entity::find();
    if let Some(id) = centre_id {
        query = query.filter(Column::CentreId.eq(id));
    }
    if let Some(range) = range {
        let (from, to_exclusive) = range_bounds(range);
        query = query
            .filter(Column::SessionDate.gte(from))
            .filter(Column::SessionDate.lt(to_exclusive));
    }
    let items = query
        .order_by_asc(Column::SessionDate)
        .order_by_asc(Column::StartTime)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(items)
}
