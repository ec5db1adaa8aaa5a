//! Schedule Fixtures

use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, orders::parse_date},
    schedules::{Schedule, ScheduleStatus},
};

/// Wrapper for schedules in YAML
#[derive(Debug, Deserialize)]
pub struct SchedulesFixture {
    /// Schedules, in file order
    pub schedules: Vec<ScheduleFixture>,
}

/// Schedule fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ScheduleFixture {
    /// Schedule id
    pub id: String,

    /// Restaurant key
    pub restaurant: String,

    /// Delivery date, e.g. `2024-10-14`
    pub date: String,

    /// Status
    #[serde(default = "active")]
    pub status: ScheduleStatus,
}

fn active() -> ScheduleStatus {
    ScheduleStatus::Active
}

impl ScheduleFixture {
    /// Convert into a [`Schedule`].
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Date`] if the date does not parse.
    pub fn to_schedule(&self) -> Result<Schedule, FixtureError> {
        Ok(Schedule {
            id: self.id.clone(),
            date: parse_date(&self.date)?,
            status: self.status,
        })
    }
}
