use anyhow::Result;
use async_trait::async_trait;
use contracts::data_schemes::ds02_facts::FactTrial;
use contracts::shared::filters::FactFilter;
use once_cell::sync::OnceCell;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

use crate::domain::a006_website_lead;
use crate::shared::data::db::table_exists;
use crate::shared::dates::date_key;

/// Where trial / lead facts come from.
///
/// The lead table ships in a later migration than the core schema, so a
/// deployment may not have it. The implementation is picked once at startup
/// by [`detect_trial_source`].
#[async_trait]
pub trait TrialSource: Send + Sync {
    async fn list_trials(
        &self,
        db: &DatabaseConnection,
        filter: &FactFilter,
    ) -> Result<Vec<FactTrial>>;

    fn name(&self) -> &'static str;
}

/// Reads `a006_website_lead`
pub struct PresentTrialSource;

/// Stands in for a deployment without the lead table
pub struct AbsentTrialSource;

#[async_trait]
impl TrialSource for PresentTrialSource {
    async fn list_trials(
        &self,
        db: &DatabaseConnection,
        filter: &FactFilter,
    ) -> Result<Vec<FactTrial>> {
        let rows = a006_website_lead::repository::list(
            db,
            filter.centre_id,
            filter.date_range.as_ref(),
            filter.program_type.as_deref(),
        )
        .await;

        match rows {
            Ok(rows) => Ok(rows.into_iter().map(project_trial).collect()),
            // Table dropped or never migrated after startup detection
            Err(e) if is_missing_table(&e) => {
                tracing::warn!("Lead table unavailable, returning no trials: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "present"
    }
}

#[async_trait]
impl TrialSource for AbsentTrialSource {
    async fn list_trials(
        &self,
        _db: &DatabaseConnection,
        _filter: &FactFilter,
    ) -> Result<Vec<FactTrial>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "absent"
    }
}

/// SQLite reports an unknown table as "no such table: <name>"
pub fn is_missing_table(err: &DbErr) -> bool {
    err.to_string().to_lowercase().contains("no such table")
}

pub async fn detect_trial_source(db: &DatabaseConnection) -> Result<Arc<dyn TrialSource>> {
    if table_exists(db, a006_website_lead::repository::TABLE_NAME).await? {
        Ok(Arc::new(PresentTrialSource))
    } else {
        tracing::warn!(
            "Table {} not found; trial facts will be empty",
            a006_website_lead::repository::TABLE_NAME
        );
        Ok(Arc::new(AbsentTrialSource))
    }
}

static TRIAL_SOURCE: OnceCell<Arc<dyn TrialSource>> = OnceCell::new();

/// Inspect the record store and remember the result for the process lifetime
pub async fn initialize(db: &DatabaseConnection) -> Result<()> {
    let source = detect_trial_source(db).await?;
    tracing::info!("Trial source: {}", source.name());
    TRIAL_SOURCE
        .set(source)
        .map_err(|_| anyhow::anyhow!("Trial source already initialized"))?;
    Ok(())
}

pub fn get_trial_source() -> Arc<dyn TrialSource> {
    TRIAL_SOURCE
        .get()
        .cloned()
        .unwrap_or_else(|| Arc::new(PresentTrialSource))
}

/// Convenience wrapper used by the fact endpoints
pub async fn list_fact_trials(
    db: &DatabaseConnection,
    source: &dyn TrialSource,
    filter: &FactFilter,
) -> Result<Vec<FactTrial>> {
    source.list_trials(db, filter).await
}

fn project_trial(m: a006_website_lead::repository::Model) -> FactTrial {
    FactTrial {
        trial_id: m.id,
        name: m.name,
        phone: m.phone,
        email: m.email,
        centre_id: m.centre_id,
        program_type: m.program_type,
        created_date: date_key(&m.created_at),
        status: m.status,
        converted_player_id: m.converted_student_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support;
    use contracts::shared::filters::DateRange;

    fn january_centre_1() -> FactFilter {
        FactFilter::for_centre(1, DateRange::parse("2024-01-01", "2024-01-31").unwrap())
    }

    #[tokio::test]
    async fn test_present_source_reads_leads() {
        let db = test_support::seeded_db(true).await;
        let trials = PresentTrialSource
            .list_trials(&db, &january_centre_1())
            .await
            .unwrap();

        assert_eq!(trials.len(), 3);
        assert_eq!(trials[0].converted_player_id, Some(2));
        assert_eq!(trials[0].created_date, "2024-01-08");
    }

    #[tokio::test]
    async fn test_lead_stamped_on_last_day_stays_in_range() {
        let db = test_support::seeded_db(true).await;
        test_support::exec_script(
            &db,
            "INSERT INTO a006_website_lead (id, name, centre_id, created_at, status) \
             VALUES (9, 'Late Parent', 1, '2024-01-31T21:10:00', 'NEW'), \
                    (10, 'Next Month', 1, '2024-02-01T00:05:00', 'NEW')",
        )
        .await;

        let trials = PresentTrialSource
            .list_trials(&db, &january_centre_1())
            .await
            .unwrap();
        let ids: Vec<i32> = trials.iter().map(|t| t.trial_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 9]);
        assert_eq!(trials[3].created_date, "2024-01-31");
    }

    #[tokio::test]
    async fn test_missing_table_yields_empty_instead_of_error() {
        let db = test_support::seeded_db(false).await;
        let trials = PresentTrialSource
            .list_trials(&db, &january_centre_1())
            .await
            .unwrap();
        assert!(trials.is_empty());
    }

    #[tokio::test]
    async fn test_other_lead_errors_propagate() {
        // Table exists but lacks the columns the reader selects
        let db = test_support::memory_db(false).await;
        test_support::exec_script(
            &db,
            "CREATE TABLE a006_website_lead (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
        )
        .await;

        let result = PresentTrialSource.list_trials(&db, &january_centre_1()).await;
        let err = result.unwrap_err();
        assert!(!err.to_string().to_lowercase().contains("no such table"));
    }

    #[tokio::test]
    async fn test_detection_picks_implementation_by_schema() {
        let without = test_support::memory_db(false).await;
        assert_eq!(detect_trial_source(&without).await.unwrap().name(), "absent");

        let with = test_support::memory_db(true).await;
        assert_eq!(detect_trial_source(&with).await.unwrap().name(), "present");
    }

    #[tokio::test]
    async fn test_absent_source_is_always_empty() {
        let db = test_support::seeded_db(true).await;
        let trials = list_fact_trials(&db, &AbsentTrialSource, &FactFilter::default())
            .await
            .unwrap();
        assert!(trials.is_empty());
    }

    #[test]
    fn test_is_missing_table() {
        let err = DbErr::Custom("error returned from database: no such table: a006_website_lead".into());
        assert!(is_missing_table(&err));
        assert!(!is_missing_table(&DbErr::Custom("database is locked".into())));
    }
}
