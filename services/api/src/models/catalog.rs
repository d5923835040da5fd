//! Catalog and entitlement models

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Catalog course, immutable after seeding
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Price in integer cents; display formatting is a client concern
    pub price: i32,
    /// Course length in hours
    pub duration: i32,
    pub image_url: String,
    /// Rating in integer tenths, e.g. 45 = 4.5 out of 5
    pub rating: i32,
    pub review_count: i32,
    pub featured: bool,
    pub is_new: bool,
    pub is_bestseller: bool,
}

/// Seed payload for a course, before an id is assigned
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub price: i32,
    pub duration: i32,
    pub image_url: String,
    pub rating: i32,
    pub review_count: i32,
    pub featured: bool,
    pub is_new: bool,
    pub is_bestseller: bool,
}

/// One-time purchase record: a user's access to a single course
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCourseGrant {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub purchased_at: DateTime<Utc>,
}

/// Subscription billing cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Monthly,
    Annual,
}

impl PlanType {
    /// End of the billing term starting at `start`.
    ///
    /// Calendar arithmetic via `chrono::Months`: the day of month clamps
    /// to the last day of the target month (Jan 31 + 1 month = Feb 28/29).
    pub fn term_end(self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = match self {
            PlanType::Monthly => 1,
            PlanType::Annual => 12,
        };
        start.checked_add_months(Months::new(months))
    }
}

/// Recurring entitlement; at most one active row per user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i32,
    pub user_id: i32,
    pub plan_type: PlanType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
}

/// Request body for POST /api/purchase
///
/// `purchase_type` stays a plain string here so an out-of-enum value can
/// be answered with a field-level 400 instead of a body rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub purchase_type: String,
    pub course_id: Option<i32>,
}
