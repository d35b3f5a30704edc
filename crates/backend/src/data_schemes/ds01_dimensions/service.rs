use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use contracts::data_schemes::ds01_dimensions::{DimCentre, DimPlayer};
use contracts::shared::filters::DimensionFilter;
use sea_orm::DatabaseConnection;

use crate::domain::{a001_centre, a002_student};
use crate::shared::dates::parse_date;

/// Whole years between `dob` and `today`, counting a year only once the
/// birthday has occurred in `today`'s year.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Active centres, ordered by display order
pub async fn list_dim_centres(
    db: &DatabaseConnection,
    filter: &DimensionFilter,
) -> Result<Vec<DimCentre>> {
    let centres = a001_centre::repository::list_active(db, filter.centre_id).await?;
    Ok(centres.into_iter().map(to_dim_centre).collect())
}

/// Players matching the filter, with `age` computed as of `today`
pub async fn list_dim_players(
    db: &DatabaseConnection,
    filter: &DimensionFilter,
    today: NaiveDate,
) -> Result<Vec<DimPlayer>> {
    let students =
        a002_student::repository::list(db, filter.centre_id, filter.program_type.as_deref())
            .await?;
    Ok(students
        .into_iter()
        .map(|s| to_dim_player(s, today))
        .collect())
}

fn to_dim_centre(m: a001_centre::repository::Model) -> DimCentre {
    DimCentre {
        centre_id: m.id,
        centre_name: m.name,
        short_name: m.short_name,
        locality: m.locality,
        city: m.city,
        state: m.state,
        is_active: m.is_active,
        display_order: m.display_order,
    }
}

pub(crate) fn to_dim_player(m: a002_student::repository::Model, today: NaiveDate) -> DimPlayer {
    let age = m
        .date_of_birth
        .as_deref()
        .and_then(parse_date)
        .map(|dob| age_on(dob, today));

    DimPlayer {
        player_id: m.id,
        full_name: m.full_name,
        date_of_birth: m.date_of_birth,
        age,
        centre_id: m.centre_id,
        program_type: m.program_type,
        joining_date: m.joining_date,
        status: m.status,
        monthly_fee: m.monthly_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_birthday_boundary() {
        let dob = d("2008-03-15");
        assert_eq!(age_on(dob, d("2024-03-14")), 15);
        assert_eq!(age_on(dob, d("2024-03-15")), 16);
        assert_eq!(age_on(dob, d("2024-12-31")), 16);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        let dob = d("2012-02-29");
        assert_eq!(age_on(dob, d("2023-02-28")), 10);
        assert_eq!(age_on(dob, d("2023-03-01")), 11);
    }

    #[tokio::test]
    async fn test_centres_are_active_only_and_ordered() {
        let db = test_support::seeded_db(false).await;
        let centres = list_dim_centres(&db, &DimensionFilter::default())
            .await
            .unwrap();
        let ids: Vec<i32> = centres.iter().map(|c| c.centre_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(centres[1].short_name.as_deref(), Some("NF"));
    }

    #[tokio::test]
    async fn test_players_carry_age_or_null() {
        let db = test_support::seeded_db(false).await;
        let players = list_dim_players(&db, &DimensionFilter::for_centre(1), d("2024-03-14"))
            .await
            .unwrap();

        assert_eq!(players.len(), 4);
        let asha = players.iter().find(|p| p.player_id == 1).unwrap();
        assert_eq!(asha.age, Some(15));
        let kiran = players.iter().find(|p| p.player_id == 3).unwrap();
        assert_eq!(kiran.age, None);
    }

    #[tokio::test]
    async fn test_players_filtered_by_program() {
        let db = test_support::seeded_db(false).await;
        let filter = DimensionFilter {
            centre_id: None,
            program_type: Some("U12".to_string()),
        };
        let players = list_dim_players(&db, &filter, d("2024-03-14")).await.unwrap();
        let ids: Vec<i32> = players.iter().map(|p| p.player_id).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[tokio::test]
    async fn test_unknown_centre_yields_empty() {
        let db = test_support::seeded_db(false).await;
        let centres = list_dim_centres(&db, &DimensionFilter::for_centre(99))
            .await
            .unwrap();
        assert!(centres.is_empty());
    }
}
