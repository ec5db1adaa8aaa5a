//! Schedules
//!
//! A schedule puts a restaurant on a company's menu for one delivery date. Vendors and admins
//! can pause a schedule; customers only ever see the restaurants scheduled inside the current
//! [`OrderWindow`].

use std::collections::BTreeSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{catalog::MenuItem, dates::OrderWindow, orders::CompanyRef};

/// Whether a schedule takes orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    /// Taking orders
    Active,

    /// Paused
    Inactive,
}

/// Status change requested for a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleAction {
    /// Resume a paused schedule
    Activate,

    /// Pause an active schedule
    Deactivate,
}

impl ScheduleAction {
    /// The action that flips `status`.
    pub fn toggle(status: ScheduleStatus) -> Self {
        match status {
            ScheduleStatus::Active => Self::Deactivate,
            ScheduleStatus::Inactive => Self::Activate,
        }
    }
}

/// A restaurant's schedule for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Schedule id
    #[serde(rename = "_id")]
    pub id: String,

    /// Delivery date
    pub date: Timestamp,

    /// Current status
    pub status: ScheduleStatus,
}

impl Schedule {
    /// Delivery date as epoch milliseconds.
    pub fn date_ms(&self) -> i64 {
        self.date.as_millisecond()
    }
}

/// Finds the schedule for a delivery date.
pub fn schedule_on(schedules: &[Schedule], delivery_date: i64) -> Option<&Schedule> {
    schedules
        .iter()
        .find(|schedule| schedule.date_ms() == delivery_date)
}

/// Rebuilds `schedules` with `status` applied to `schedule_id`.
pub fn schedules_with_status(
    schedules: &[Schedule],
    schedule_id: &str,
    status: ScheduleStatus,
) -> Vec<Schedule> {
    schedules
        .iter()
        .map(|schedule| {
            if schedule.id == schedule_id {
                Schedule {
                    status,
                    ..schedule.clone()
                }
            } else {
                schedule.clone()
            }
        })
        .collect()
}

/// A restaurant scheduled for a company and date, as listed to admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledRestaurant {
    /// Restaurant id
    #[serde(rename = "_id")]
    pub id: String,

    /// Restaurant name
    pub name: String,

    /// Delivery date
    pub date: Timestamp,

    /// Company served
    pub company: CompanyRef,

    /// Schedule status
    pub status: ScheduleStatus,

    /// Schedule id
    pub schedule_id: String,
}

impl ScheduledRestaurant {
    /// Delivery date as epoch milliseconds.
    pub fn date_ms(&self) -> i64 {
        self.date.as_millisecond()
    }
}

/// Status the server reported for `schedule_id` in a status change response.
pub fn reported_status(
    reported: &[ScheduledRestaurant],
    schedule_id: &str,
) -> Option<ScheduleStatus> {
    reported
        .iter()
        .find(|restaurant| restaurant.schedule_id == schedule_id)
        .map(|restaurant| restaurant.status)
}

/// Rebuilds a scheduled restaurant list with `status` applied to `schedule_id`.
pub fn restaurants_with_status(
    restaurants: &[ScheduledRestaurant],
    schedule_id: &str,
    status: ScheduleStatus,
) -> Vec<ScheduledRestaurant> {
    restaurants
        .iter()
        .map(|restaurant| {
            if restaurant.schedule_id == schedule_id {
                ScheduledRestaurant {
                    status,
                    ..restaurant.clone()
                }
            } else {
                restaurant.clone()
            }
        })
        .collect()
}

/// A scheduled restaurant with its menu, as offered to customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRestaurant {
    /// Schedule details
    #[serde(flatten)]
    pub scheduled: ScheduledRestaurant,

    /// Logo url
    #[serde(default)]
    pub logo: String,

    /// Menu
    #[serde(default)]
    pub items: Vec<MenuItem>,

    /// When the restaurant was scheduled
    pub scheduled_at: Timestamp,
}

/// Distinct delivery dates customers can order for, ascending.
pub fn upcoming_dates(restaurants: &[UpcomingRestaurant], window: &OrderWindow) -> Vec<i64> {
    restaurants
        .iter()
        .map(|restaurant| restaurant.scheduled.date_ms())
        .filter(|date| window.accepts(*date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Restaurants serving a delivery date, in the order they were scheduled.
pub fn restaurants_on(
    restaurants: &[UpcomingRestaurant],
    delivery_date: i64,
) -> Vec<&UpcomingRestaurant> {
    let mut on_date: Vec<&UpcomingRestaurant> = restaurants
        .iter()
        .filter(|restaurant| restaurant.scheduled.date_ms() == delivery_date)
        .collect();

    on_date.sort_by_key(|restaurant| restaurant.scheduled_at);

    on_date
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn scheduled(schedule_id: &str, date: &str, status: ScheduleStatus) -> TestResult<ScheduledRestaurant> {
        Ok(ScheduledRestaurant {
            id: "r1".to_string(),
            name: "Zed's".to_string(),
            date: format!("{date}T00:00:00Z").parse()?,
            company: CompanyRef {
                id: "c1".to_string(),
                name: "Acme".to_string(),
                shift: "day".to_string(),
            },
            status,
            schedule_id: schedule_id.to_string(),
        })
    }

    fn upcoming(date: &str, scheduled_at: &str) -> TestResult<UpcomingRestaurant> {
        Ok(UpcomingRestaurant {
            scheduled: scheduled(scheduled_at, date, ScheduleStatus::Active)?,
            logo: String::new(),
            items: Vec::new(),
            scheduled_at: scheduled_at.parse()?,
        })
    }

    #[test]
    fn toggle_flips_status() {
        assert_eq!(ScheduleAction::toggle(ScheduleStatus::Active), ScheduleAction::Deactivate);
        assert_eq!(ScheduleAction::toggle(ScheduleStatus::Inactive), ScheduleAction::Activate);
    }

    #[test]
    fn action_serializes_as_pascal_case() -> TestResult {
        assert_eq!(serde_json::to_string(&ScheduleAction::Deactivate)?, "\"Deactivate\"");
        assert_eq!(serde_json::to_string(&ScheduleStatus::Inactive)?, "\"INACTIVE\"");

        Ok(())
    }

    #[test]
    fn applies_reported_status_to_matching_schedule_only() -> TestResult {
        let restaurants = vec![
            scheduled("s1", "2024-10-21", ScheduleStatus::Active)?,
            scheduled("s2", "2024-10-22", ScheduleStatus::Active)?,
        ];
        let reported = vec![scheduled("s1", "2024-10-21", ScheduleStatus::Inactive)?];

        let status = reported_status(&reported, "s1").ok_or("status missing")?;
        let updated = restaurants_with_status(&restaurants, "s1", status);

        let statuses: Vec<ScheduleStatus> =
            updated.iter().map(|restaurant| restaurant.status).collect();

        assert_eq!(statuses, vec![ScheduleStatus::Inactive, ScheduleStatus::Active]);
        assert!(reported_status(&reported, "s9").is_none());

        Ok(())
    }

    #[test]
    fn vendor_schedules_take_new_status() -> TestResult {
        let schedules = vec![Schedule {
            id: "s1".to_string(),
            date: "2024-10-21T00:00:00Z".parse()?,
            status: ScheduleStatus::Inactive,
        }];

        let updated = schedules_with_status(&schedules, "s1", ScheduleStatus::Active);

        assert_eq!(updated.first().map(|schedule| schedule.status), Some(ScheduleStatus::Active));
        assert_eq!(
            schedule_on(&updated, 1_729_468_800_000).map(|schedule| schedule.id.as_str()),
            Some("s1")
        );

        Ok(())
    }

    #[test]
    fn upcoming_dates_are_distinct_sorted_and_windowed() -> TestResult {
        let restaurants = vec![
            upcoming("2024-10-23", "2024-10-01T10:00:00Z")?,
            upcoming("2024-10-21", "2024-10-01T11:00:00Z")?,
            upcoming("2024-10-14", "2024-10-01T12:00:00Z")?,
            upcoming("2024-10-21", "2024-10-01T09:00:00Z")?,
        ];
        let window = OrderWindow {
            gte: 1_729_468_800_000,
            expires_at: 1_729_296_000_000,
        };

        assert_eq!(
            upcoming_dates(&restaurants, &window),
            vec![1_729_468_800_000, 1_729_641_600_000]
        );

        let on_monday: Vec<i64> = restaurants_on(&restaurants, 1_729_468_800_000)
            .iter()
            .map(|restaurant| restaurant.scheduled_at.as_millisecond())
            .collect();

        assert_eq!(on_monday.len(), 2);
        assert!(on_monday.is_sorted());

        Ok(())
    }

    #[test]
    fn upcoming_restaurant_reads_flattened_fields() -> TestResult {
        let restaurant: UpcomingRestaurant = serde_json::from_str(
            r#"{
                "_id": "r1",
                "name": "Zed's",
                "date": "2024-10-21T00:00:00.000Z",
                "company": { "_id": "c1", "name": "Acme", "shift": "day" },
                "status": "ACTIVE",
                "scheduleId": "s1",
                "logo": "https://cdn.example.com/zed.png",
                "items": [],
                "scheduledAt": "2024-10-01T10:00:00.000Z"
            }"#,
        )?;

        assert_eq!(restaurant.scheduled.schedule_id, "s1");
        assert_eq!(restaurant.scheduled.date_ms(), 1_729_468_800_000);

        Ok(())
    }
}
