//! Repository for the `commemorations` and `commemoration_registrations` tables.

use memorial_core::commemoration::check_capacity;
use memorial_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::commemoration::{
    Commemoration, CommemorationSummary, CreateCommemoration, CreateRegistration, Registration,
};

/// Column list for commemoration queries.
const COMMEMORATION_COLUMNS: &str =
    "id, title, description, location, starts_at, capacity, created_at";

/// Column list for registration queries.
const REGISTRATION_COLUMNS: &str =
    "id, commemoration_id, full_name, email, participants, created_at";

pub struct CommemorationRepo;

impl CommemorationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCommemoration,
    ) -> Result<Commemoration, sqlx::Error> {
        let query = format!(
            "INSERT INTO commemorations (title, description, location, starts_at, capacity)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COMMEMORATION_COLUMNS}"
        );
        sqlx::query_as::<_, Commemoration>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.starts_at)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Commemoration>, sqlx::Error> {
        let query = format!("SELECT {COMMEMORATION_COLUMNS} FROM commemorations WHERE id = $1");
        sqlx::query_as::<_, Commemoration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Commemorations starting at or after `from`, soonest first, with the
    /// number of participants registered so far.
    pub async fn list_upcoming(
        pool: &PgPool,
        from: Timestamp,
    ) -> Result<Vec<CommemorationSummary>, sqlx::Error> {
        sqlx::query_as::<_, CommemorationSummary>(
            "SELECT c.id, c.title, c.description, c.location, c.starts_at, c.capacity,
                    c.created_at,
                    COALESCE(SUM(r.participants), 0)::BIGINT AS registered_participants
             FROM commemorations c
             LEFT JOIN commemoration_registrations r ON r.commemoration_id = c.id
             WHERE c.starts_at >= $1
             GROUP BY c.id
             ORDER BY c.starts_at ASC",
        )
        .bind(from)
        .fetch_all(pool)
        .await
    }
}

/// Result of a capacity-checked registration.
#[derive(Debug)]
pub enum RegistrationOutcome {
    Registered(Registration),
    CommemorationNotFound,
    /// Not enough places left; carries the human-readable reason.
    Full(String),
}

pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Register participants, enforcing the commemoration's capacity.
    ///
    /// The commemoration row is locked for the duration of the transaction so
    /// concurrent registrations cannot overbook it.
    pub async fn create_checked(
        pool: &PgPool,
        commemoration_id: DbId,
        input: &CreateRegistration,
    ) -> Result<RegistrationOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let capacity: Option<Option<i32>> =
            sqlx::query_scalar("SELECT capacity FROM commemorations WHERE id = $1 FOR UPDATE")
                .bind(commemoration_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(capacity) = capacity else {
            return Ok(RegistrationOutcome::CommemorationNotFound);
        };

        let registered: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(participants), 0)::BIGINT
             FROM commemoration_registrations WHERE commemoration_id = $1",
        )
        .bind(commemoration_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Err(reason) = check_capacity(capacity, registered, input.participants) {
            return Ok(RegistrationOutcome::Full(reason));
        }

        let query = format!(
            "INSERT INTO commemoration_registrations
                (commemoration_id, full_name, email, participants)
             VALUES ($1, $2, $3, $4)
             RETURNING {REGISTRATION_COLUMNS}"
        );
        let registration = sqlx::query_as::<_, Registration>(&query)
            .bind(commemoration_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(input.participants)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(RegistrationOutcome::Registered(registration))
    }

    pub async fn list_for_commemoration(
        pool: &PgPool,
        commemoration_id: DbId,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM commemoration_registrations
             WHERE commemoration_id = $1
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(commemoration_id)
            .fetch_all(pool)
            .await
    }
}
