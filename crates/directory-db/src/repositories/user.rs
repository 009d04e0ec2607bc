//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use directory_core::entities::{current_timestamp, User};
use directory_core::error::DomainError;
use directory_core::query::{PageRequest, UserFilter};
use directory_core::schema::UserPatch;
use directory_core::traits::{PoolStats, RepoResult, UpdateOutcome, UserRepository};
use directory_core::value_objects::RecordId;

use crate::mappers::UserRow;
use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, name, email, phone, street, city, state, zip_code, country, \
                            is_active, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Outcome for a write that matched no row: either nothing changed or
    /// the record is gone
    async fn unchanged(&self, id: RecordId) -> RepoResult<UpdateOutcome> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))?;
        Ok(UpdateOutcome {
            user,
            changed: false,
        })
    }
}

/// Escape LIKE wildcards so the search term matches literally
fn escape_like_literal(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            other => out.push(other),
        }
    }
    out
}

/// Append the WHERE clause for a listing filter
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    builder.push(" WHERE 1=1");

    if let Some(active) = filter.active {
        builder.push(" AND is_active = ");
        builder.push_bind(active);
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like_literal(search));
        builder.push(" AND (");
        for (i, column) in ["name", "email", "phone"].into_iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(column);
            builder.push(" ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" ESCAPE E'\\\\'");
        }
        builder.push(")");
    }
}

/// Value bound for one patched column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnValue<'a> {
    Text(&'a str),
    NullableText(Option<&'a str>),
    Flag(bool),
}

/// Columns a patch writes, in table order
fn patch_columns(patch: &UserPatch) -> Vec<(&'static str, ColumnValue<'_>)> {
    let mut columns = Vec::new();

    for (column, value) in [
        ("name", &patch.name),
        ("email", &patch.email),
        ("phone", &patch.phone),
    ] {
        if let Some(value) = value {
            columns.push((column, ColumnValue::Text(value)));
        }
    }

    if let Some(address) = &patch.address {
        for (column, part) in [
            ("street", &address.street),
            ("city", &address.city),
            ("state", &address.state),
            ("zip_code", &address.zip_code),
            ("country", &address.country),
        ] {
            if let Some(value) = part {
                columns.push((column, ColumnValue::NullableText(value.as_deref())));
            }
        }
    }

    if let Some(active) = patch.is_active {
        columns.push(("is_active", ColumnValue::Flag(active)));
    }

    columns
}

fn push_value<'a>(builder: &mut QueryBuilder<'a, Postgres>, value: ColumnValue<'a>) {
    match value {
        ColumnValue::Text(v) => builder.push_bind(v),
        ColumnValue::NullableText(v) => builder.push_bind(v),
        ColumnValue::Flag(v) => builder.push_bind(v),
    };
}

/// Single-statement update of the patched columns.
///
/// The row only matches when at least one column differs, so a patch that
/// changes nothing writes nothing and keeps `updated_at`.
fn build_patch_update<'a>(
    id: RecordId,
    columns: &[(&'static str, ColumnValue<'a>)],
    updated_at: DateTime<Utc>,
) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE users SET ");
    for (column, value) in columns {
        builder.push(*column);
        builder.push(" = ");
        push_value(&mut builder, *value);
        builder.push(", ");
    }
    builder.push("updated_at = ");
    builder.push_bind(updated_at);

    builder.push(" WHERE id = ");
    builder.push_bind(id.into_inner());
    builder.push(" AND (");
    for (i, (column, value)) in columns.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder.push(*column);
        builder.push(" IS DISTINCT FROM ");
        push_value(&mut builder, *value);
    }
    builder.push(") RETURNING ");
    builder.push(USER_COLUMNS);
    builder
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_page(&self, filter: &UserFilter, page: &PageRequest) -> RepoResult<Vec<User>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(page.limit);
        builder.push(" OFFSET ");
        builder.push_bind(page.skip());

        let rows = builder
            .build_query_as::<UserModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &UserFilter) -> RepoResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut builder, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn email_taken(&self, email: &str, exclude: Option<RecordId>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(email)
        .bind(exclude.map(RecordId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        let row = UserRow::new(user);
        sqlx::query(
            r"
            INSERT INTO users (id, name, email, phone, street, city, state, zip_code, country,
                               is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.email)
        .bind(row.phone)
        .bind(row.street)
        .bind(row.city)
        .bind(row.state)
        .bind(row.zip_code)
        .bind(row.country)
        .bind(row.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn update_fields(&self, id: RecordId, patch: &UserPatch) -> RepoResult<UpdateOutcome> {
        let columns = patch_columns(patch);
        if columns.is_empty() {
            return self.unchanged(id).await;
        }

        let mut builder = build_patch_update(id, &columns, current_timestamp());
        let row = builder
            .build_query_as::<UserModel>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        match row {
            Some(model) => Ok(UpdateOutcome {
                user: User::from(model),
                changed: true,
            }),
            None => self.unchanged(id).await,
        }
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: RecordId, active: bool) -> RepoResult<UpdateOutcome> {
        let row = sqlx::query_as::<_, UserModel>(&format!(
            "UPDATE users SET is_active = $2, updated_at = $3 \
             WHERE id = $1 AND is_active <> $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(active)
        .bind(current_timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match row {
            Some(model) => Ok(UpdateOutcome {
                user: User::from(model),
                changed: true,
            }),
            None => self.unchanged(id).await,
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    fn pool_stats(&self) -> Option<PoolStats> {
        Some(PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle() as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }

    #[test]
    fn test_escape_like_literal() {
        assert_eq!(escape_like_literal("ann"), "ann");
        assert_eq!(escape_like_literal("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_literal("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_filter_sql() {
        let filter = UserFilter::from_raw(Some("ann"), Some("true"));
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut builder, &filter);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM users WHERE 1=1 AND is_active = $1 AND (\
             name ILIKE $2 ESCAPE E'\\\\' OR email ILIKE $3 ESCAPE E'\\\\' \
             OR phone ILIKE $4 ESCAPE E'\\\\')"
        );
    }

    #[test]
    fn test_patch_update_sql_writes_only_patched_columns() {
        let patch = UserPatch {
            name: Some("Ann".to_string()),
            address: Some(directory_core::schema::AddressPatch {
                city: Some(None),
                ..Default::default()
            }),
            ..UserPatch::default()
        };
        let columns = patch_columns(&patch);
        assert_eq!(
            columns,
            vec![
                ("name", ColumnValue::Text("Ann")),
                ("city", ColumnValue::NullableText(None)),
            ]
        );

        let builder = build_patch_update(RecordId::new(7), &columns, current_timestamp());
        let sql = builder.sql();
        assert!(sql.starts_with(
            "UPDATE users SET name = $1, city = $2, updated_at = $3 WHERE id = $4 \
             AND (name IS DISTINCT FROM $5 OR city IS DISTINCT FROM $6) RETURNING id, "
        ));
        assert!(!sql.contains("is_active ="));
        assert!(!sql.contains("email ="));
    }

    #[test]
    fn test_empty_patch_has_no_columns() {
        assert!(patch_columns(&UserPatch::default()).is_empty());
    }

    #[test]
    fn test_empty_filter_sql() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_filter(&mut builder, &UserFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM users WHERE 1=1");
    }
}
