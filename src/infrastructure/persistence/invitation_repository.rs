//! PostgreSQL implementation of the invitation repository

use crate::domain::invitation::{InvitationRecord, InvitationRepository, ResponseState};
use crate::domain::shared::error::{DomainError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error};
use uuid::Uuid;

#[derive(FromRow)]
struct InvitationRow {
    id: Uuid,
    call_id: String,
    phone_hash: String,
    inviter: String,
    place: String,
    response: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<InvitationRow> for InvitationRecord {
    fn from(r: InvitationRow) -> Self {
        InvitationRecord {
            id: r.id,
            call_id: r.call_id,
            phone_hash: r.phone_hash,
            inviter: r.inviter,
            place: r.place,
            response: ResponseState::from_column(r.response.as_deref()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("{}: {}", context, e);
    DomainError::Persistence(format!("{}: {}", context, e))
}

pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    async fn bulk_insert(&self, records: Vec<InvitationRecord>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        debug!("Inserting {} invitation record(s)", records.len());

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO invitations (id, call_id, phone_hash, inviter, place, response, created_at, updated_at) ",
        );
        builder.push_values(records.iter(), |mut row, record| {
            row.push_bind(record.id)
                .push_bind(record.call_id.clone())
                .push_bind(record.phone_hash.clone())
                .push_bind(record.inviter.clone())
                .push_bind(record.place.clone())
                .push_bind(record.response.to_column())
                .push_bind(record.created_at)
                .push_bind(record.updated_at);
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to insert invitations", e))?;

        debug!("Inserted {} invitation record(s)", records.len());
        Ok(())
    }

    async fn find_by_call_id(&self, call_id: &str) -> Result<Option<InvitationRecord>> {
        let row = sqlx::query_as::<_, InvitationRow>(
            r#"
            SELECT id, call_id, phone_hash, inviter, place, response, created_at, updated_at
            FROM invitations
            WHERE call_id = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(call_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find invitation", e))?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, record: &InvitationRecord) -> Result<bool> {
        debug!("Updating invitation {}", record.id);

        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET response = $2, updated_at = $3
            WHERE id = $1 AND response IS NULL
            "#,
        )
        .bind(record.id)
        .bind(record.response.to_column())
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update invitation", e))?;

        Ok(result.rows_affected() > 0)
    }
}
