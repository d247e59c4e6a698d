use sqlx::MySqlPool;

use crate::{
    error::AppError,
    model::leave_request::{LeaveRequest, LeaveStatus},
    store::{LeavePatch, LeaveQuery, LeaveStore, NewLeaveRequest, SortDir},
};

const SELECT_COLUMNS: &str =
    "id, user_id, start_date, end_date, reason, leave_type, status, created_on, file";

/// Helper enum for typed SQLx binding of dynamically built WHERE clauses.
enum FilterValue {
    U64(u64),
    Str(String),
}

#[derive(Clone)]
pub struct MySqlLeaveStore {
    pool: MySqlPool,
}

impl MySqlLeaveStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn where_clause(q: &LeaveQuery) -> (String, Vec<FilterValue>) {
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<FilterValue> = Vec::new();

        if let Some(user_id) = q.user_id {
            where_sql.push_str(" AND user_id = ?");
            args.push(FilterValue::U64(user_id));
        }

        if let Some(needle) = &q.reason_contains {
            where_sql.push_str(" AND LOWER(reason) LIKE ?");
            // Backslash first, or the escapes below get double-escaped.
            let escaped = needle
                .to_lowercase()
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            args.push(FilterValue::Str(format!("%{escaped}%")));
        }

        if let Some(status) = q.status {
            where_sql.push_str(" AND status = ?");
            args.push(FilterValue::Str(status.to_string()));
        }

        (where_sql, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query_with_reason(needle: &str) -> LeaveQuery {
        LeaveQuery {
            user_id: None,
            reason_contains: Some(needle.into()),
            status: None,
            sort: SortDir::Asc,
            offset: 0,
            limit: 10,
        }
    }

    #[test]
    fn like_pattern_escapes_wildcards_and_backslash() {
        let (sql, args) = MySqlLeaveStore::where_clause(&query_with_reason(r"50%_done\maybe"));
        assert_eq!(sql, " WHERE 1=1 AND LOWER(reason) LIKE ?");
        assert_eq!(args.len(), 1);
        assert!(matches!(&args[0], FilterValue::Str(p) if p == "%50\\%\\_done\\\\maybe%"));
    }

    #[test]
    fn all_filters_combine_in_fixed_order() {
        let q = LeaveQuery {
            user_id: Some(7),
            reason_contains: Some("Flu".into()),
            status: Some(LeaveStatus::Pending),
            sort: SortDir::Desc,
            offset: 0,
            limit: 5,
        };
        let (sql, args) = MySqlLeaveStore::where_clause(&q);
        assert_eq!(
            sql,
            " WHERE 1=1 AND user_id = ? AND LOWER(reason) LIKE ? AND status = ?"
        );
        assert_eq!(args.len(), 3);
        assert!(matches!(args[0], FilterValue::U64(7)));
        assert!(matches!(&args[1], FilterValue::Str(s) if s == "%flu%"));
        assert!(matches!(&args[2], FilterValue::Str(s) if s == "Pending"));
    }
}

impl LeaveStore for MySqlLeaveStore {
    async fn insert(&self, rec: NewLeaveRequest) -> Result<LeaveRequest, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (user_id, start_date, end_date, reason, leave_type, status, created_on, file)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(rec.user_id)
        .bind(rec.start_date)
        .bind(rec.end_date)
        .bind(&rec.reason)
        .bind(rec.leave_type.to_string())
        .bind(rec.status.to_string())
        .bind(rec.created_on)
        .bind(&rec.file)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        self.get(id)
            .await?
            .ok_or(AppError::Store(sqlx::Error::RowNotFound))
    }

    async fn get(&self, id: u64) -> Result<Option<LeaveRequest>, AppError> {
        let record = sqlx::query_as::<_, LeaveRequest>(&format!(
            "SELECT {SELECT_COLUMNS} FROM leave_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update(&self, id: u64, patch: LeavePatch) -> Result<Option<LeaveRequest>, AppError> {
        sqlx::query(
            r#"
            UPDATE leave_requests
            SET start_date = ?, end_date = ?, reason = ?, leave_type = ?, file = ?
            WHERE id = ?
            "#,
        )
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(&patch.reason)
        .bind(patch.leave_type.to_string())
        .bind(&patch.file)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // rows_affected is 0 for no-op updates on MySQL, so re-read instead.
        self.get(id).await
    }

    async fn set_status(
        &self,
        id: u64,
        status: LeaveStatus,
    ) -> Result<Option<LeaveRequest>, AppError> {
        sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get(id).await
    }

    async fn delete(&self, id: u64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM leave_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, q: &LeaveQuery) -> Result<(Vec<LeaveRequest>, i64), AppError> {
        let (where_sql, args) = Self::where_clause(q);

        let count_sql = format!("SELECT COUNT(*) FROM leave_requests{where_sql}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &args {
            count_q = match arg {
                FilterValue::U64(v) => count_q.bind(*v),
                FilterValue::Str(s) => count_q.bind(s.clone()),
            };
        }
        let total = count_q.fetch_one(&self.pool).await?;

        let order = match q.sort {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        };
        let data_sql = format!(
            "SELECT {SELECT_COLUMNS} FROM leave_requests{where_sql} \
             ORDER BY created_on {order} LIMIT ? OFFSET ?"
        );

        let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
        for arg in args {
            data_q = match arg {
                FilterValue::U64(v) => data_q.bind(v),
                FilterValue::Str(s) => data_q.bind(s),
            };
        }

        let records = data_q
            .bind(q.limit)
            .bind(q.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((records, total))
    }
}
