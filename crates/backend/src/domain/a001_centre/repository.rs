use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_centre")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub short_name: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Active centres ordered by display order, optionally a single one
pub async fn list_active<C: ConnectionTrait>(
    db: &C,
    centre_id: Option<i32>,
) -> anyhow::Result<Vec<Model>> {
    let mut query = Entity::find().filter(Column::IsActive.eq(true));
    if let Some(id) = centre_id {
        query = query.filter(Column::Id.eq(id));
    }
    let items = query
        .order_by_asc(Column::DisplayOrder)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(items)
}
