//! Catalog and entitlement repositories
//!
//! The entitlement repository is the sole writer of grant and
//! subscription rows. `create_subscription` performs its
//! deactivate-then-insert sequence under one lock acquisition, which is
//! what upholds the "at most one active subscription per user" invariant
//! under concurrent purchases.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use common::error::{StoreError, StoreResult};
use common::store::Table;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::catalog::{Course, NewCourse, PlanType, Subscription, UserCourseGrant};

/// Course catalog, seeded once at startup and read-only afterwards
#[derive(Clone)]
pub struct CatalogRepository {
    courses: Arc<Mutex<Table<Course>>>,
}

impl CatalogRepository {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            courses: Arc::new(Mutex::new(Table::new())),
        }
    }

    /// Seed the catalog, validating each record before insertion
    ///
    /// Ratings are integer tenths and must sit in 0..=50; prices are
    /// integer cents and must be positive. A violation aborts the seed.
    pub async fn seed(&self, seeds: Vec<NewCourse>) -> StoreResult<usize> {
        let mut courses = self.courses.lock().await;

        for seed in &seeds {
            if !(0..=50).contains(&seed.rating) {
                return Err(StoreError::InvalidSeed(format!(
                    "course '{}' has rating {} outside 0..=50",
                    seed.title, seed.rating
                )));
            }
            if seed.price <= 0 {
                return Err(StoreError::InvalidSeed(format!(
                    "course '{}' has non-positive price {}",
                    seed.title, seed.price
                )));
            }
        }

        let count = seeds.len();
        for seed in seeds {
            courses.insert(|id| Course {
                id,
                title: seed.title,
                description: seed.description,
                price: seed.price,
                duration: seed.duration,
                image_url: seed.image_url,
                rating: seed.rating,
                review_count: seed.review_count,
                featured: seed.featured,
                is_new: seed.is_new,
                is_bestseller: seed.is_bestseller,
            });
        }

        info!("Seeded {} catalog courses", count);
        Ok(count)
    }

    /// All courses in insertion order
    pub async fn list(&self) -> Result<Vec<Course>> {
        let courses = self.courses.lock().await;
        Ok(courses.values().cloned().collect())
    }

    /// Look up a course by id; absence is a valid result, not an error
    pub async fn get(&self, id: i32) -> Result<Option<Course>> {
        let courses = self.courses.lock().await;
        Ok(courses.get(id).cloned())
    }
}

impl Default for CatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Grants and subscriptions: what each user is entitled to
#[derive(Clone)]
pub struct EntitlementRepository {
    catalog: CatalogRepository,
    grants: Arc<Mutex<Table<UserCourseGrant>>>,
    subscriptions: Arc<Mutex<Table<Subscription>>>,
}

impl EntitlementRepository {
    /// Create an entitlement repository resolving courses through `catalog`
    pub fn new(catalog: CatalogRepository) -> Self {
        Self {
            catalog,
            grants: Arc::new(Mutex::new(Table::new())),
            subscriptions: Arc::new(Mutex::new(Table::new())),
        }
    }

    /// Append a one-time purchase record
    ///
    /// No duplicate check: a user may hold several grants for the same
    /// course (re-purchase stays permitted).
    pub async fn grant_course(&self, user_id: i32, course_id: i32) -> Result<UserCourseGrant> {
        info!("Granting course {} to user {}", course_id, user_id);

        let mut grants = self.grants.lock().await;
        let grant = grants
            .insert(|id| UserCourseGrant {
                id,
                user_id,
                course_id,
                purchased_at: Utc::now(),
            })
            .clone();

        Ok(grant)
    }

    /// Courses the user holds a grant for, resolved through the catalog
    ///
    /// Grants whose course no longer exists are silently dropped.
    pub async fn courses_for_user(&self, user_id: i32) -> Result<Vec<Course>> {
        let course_ids: Vec<i32> = {
            let grants = self.grants.lock().await;
            grants
                .values()
                .filter(|g| g.user_id == user_id)
                .map(|g| g.course_id)
                .collect()
        };

        let mut courses = Vec::with_capacity(course_ids.len());
        for course_id in course_ids {
            if let Some(course) = self.catalog.get(course_id).await? {
                courses.push(course);
            }
        }

        Ok(courses)
    }

    /// The unique active subscription for a user, if any
    pub async fn active_subscription(&self, user_id: i32) -> Result<Option<Subscription>> {
        let subscriptions = self.subscriptions.lock().await;
        Ok(subscriptions
            .values()
            .find(|s| s.user_id == user_id && s.active)
            .cloned())
    }

    /// Look up a subscription row by id, active or not
    pub async fn subscription(&self, id: i32) -> Result<Option<Subscription>> {
        let subscriptions = self.subscriptions.lock().await;
        Ok(subscriptions.get(id).cloned())
    }

    /// Replace the user's active subscription with a new one
    ///
    /// Any prior active row is flipped inactive before the insert; both
    /// steps happen under the same lock, so concurrent calls for the same
    /// user serialize and exactly one row ends up active.
    pub async fn create_subscription(
        &self,
        user_id: i32,
        plan_type: PlanType,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<Subscription> {
        info!("Creating {:?} subscription for user {}", plan_type, user_id);

        let mut subscriptions = self.subscriptions.lock().await;

        for row in subscriptions.values_mut() {
            if row.user_id == user_id && row.active {
                row.active = false;
            }
        }

        let subscription = subscriptions
            .insert(|id| Subscription {
                id,
                user_id,
                plan_type,
                start_date,
                end_date,
                active: true,
            })
            .clone();

        Ok(subscription)
    }
}
