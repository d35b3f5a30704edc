use contracts::shared::filters::DateRange;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::shared::dates::range_bounds;

pub const TABLE_NAME: &str = "a006_website_lead";

/// Lead captured by the marketing site; may not exist on older deployments.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_website_lead")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub centre_id: Option<i32>,
    pub program_type: Option<String>,
    /// "YYYY-MM-DD"
    pub created_at: String,
    pub status: String,
    pub converted_student_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Plain read; a missing table surfaces as `DbErr` so the caller can decide.
pub async fn list<C: ConnectionTrait>(
    db: &C,
    centre_id: Option<i32>,
    range: Option<&DateRange>,
    program_type: Option<&str>,
) -> Result<Vec<Model>, DbErr> {
    let mut query = Entity::find();
    if let Some(id) = centre_id {
        query = query.filter(Column::CentreId.eq(id));
    }
    if let Some(range) = range {
        let (from, to_exclusive) = range_bounds(range);
        query = query
            .filter(Column::CreatedAt.gte(from))
            .filter(Column::CreatedAt.lt(to_exclusive));
    }
    if let Some(program) = program_type {
        query = query.filter(Column::ProgramType.eq(program));
    }
    query
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await
}
