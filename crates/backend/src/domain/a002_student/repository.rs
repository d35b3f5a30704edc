use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    /// "YYYY-MM-DD"
    pub date_of_birth: Option<String>,
    pub centre_id: Option<i32>,
    pub program_type: Option<String>,
    /// "YYYY-MM-DD"
    pub joining_date: String,
    pub status: String,
    pub monthly_fee: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list<C: ConnectionTrait>(
    db: &C,
    centre_id: Option<i32>,
    program_type: Option<&str>,
) -> anyhow::Result<Vec<Model>> {
    let mut query = Entity::find();
    if let Some(id) = centre_id {
        query = query.filter(Column::CentreId.eq(id));
    }
    if let Some(program) = program_type {
        query = query.filter(Column::ProgramType.eq(program));
    }
    let items = query.order_by_asc(Column::Id).all(db).await?;
    Ok(items)
}

pub async fn list_by_ids<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> anyhow::Result<Vec<Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let items = Entity::find()
        .filter(Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(items)
}
