use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date range. `from <= to` is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Parse a pair of "YYYY-MM-DD" strings
    pub fn parse(from: &str, to: &str) -> anyhow::Result<Self> {
        let from = NaiveDate::parse_from_str(from, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date_from '{}': {}", from, e))?;
        let to = NaiveDate::parse_from_str(to, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date_to '{}': {}", to, e))?;
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Number of days between `from` and `to` (0 for a single-day range)
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Bounds formatted the way the record store keeps dates
    pub fn as_strings(&self) -> (String, String) {
        (
            self.from.format("%Y-%m-%d").to_string(),
            self.to.format("%Y-%m-%d").to_string(),
        )
    }
}

/// Filter set accepted by every fact reader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactFilter {
    pub centre_id: Option<i32>,
    pub date_range: Option<DateRange>,
    pub program_type: Option<String>,
}

impl FactFilter {
    pub fn for_centre(centre_id: i32, range: DateRange) -> Self {
        Self {
            centre_id: Some(centre_id),
            date_range: Some(range),
            program_type: None,
        }
    }
}

/// Filter set accepted by the dimension readers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionFilter {
    pub centre_id: Option<i32>,
    pub program_type: Option<String>,
}

impl DimensionFilter {
    pub fn for_centre(centre_id: i32) -> Self {
        Self {
            centre_id: Some(centre_id),
            program_type: None,
        }
    }
}

/// Query string of the analytics endpoints:
/// `?centre_id=1&date_from=2024-01-01&date_to=2024-01-31&program_type=U12`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub centre_id: Option<i32>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub program_type: Option<String>,
}

impl AnalyticsQuery {
    /// A range is only applied when both bounds are present
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => Some(DateRange::new(from, to)),
            _ => None,
        }
    }

    pub fn to_fact_filter(&self) -> FactFilter {
        FactFilter {
            centre_id: self.centre_id,
            date_range: self.date_range(),
            program_type: self.program_type.clone().filter(|p| !p.is_empty()),
        }
    }

    pub fn to_dimension_filter(&self) -> DimensionFilter {
        DimensionFilter {
            centre_id: self.centre_id,
            program_type: self.program_type.clone().filter(|p| !p.is_empty()),
        }
    }
}
