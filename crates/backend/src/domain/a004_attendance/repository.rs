use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

/// One mark per (session, student); uniqueness is enforced by the table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub session_id: i32,
    pub student_id: i32,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list_by_sessions<C: ConnectionTrait>(
    db: &C,
    session_ids: Vec<i32>,
) -> anyhow::Result<Vec<Model>> {
    if session_ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::SessionId.is_in(session_ids))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(items)
}
