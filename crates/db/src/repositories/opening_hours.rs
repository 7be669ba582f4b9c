use crate::models::DbOpeningHours;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_hours_for_day(
    pool: &Pool<Postgres>,
    day_of_week: i16,
) -> Result<Option<DbOpeningHours>> {
    tracing::debug!("Getting opening hours for day_of_week={}", day_of_week);

    let hours = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        SELECT day_of_week, open_time, close_time, is_closed
        FROM opening_hours
        WHERE day_of_week = $1
        "#,
    )
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    Ok(hours)
}

pub async fn list_opening_hours(pool: &Pool<Postgres>) -> Result<Vec<DbOpeningHours>> {
    let hours = sqlx::query_as::<_, DbOpeningHours>(
        r#"
        SELECT day_of_week, open_time, close_time, is_closed
        FROM opening_hours
        ORDER BY day_of_week ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(hours)
}

/// Upsert the published hours, keyed on weekday. Times are nulled for
/// closed days so a later reopen starts from a clean slate.
pub async fn upsert_opening_hours(
    pool: &Pool<Postgres>,
    rows: &[DbOpeningHours],
) -> Result<Vec<DbOpeningHours>> {
    let mut saved = Vec::with_capacity(rows.len());

    for row in rows {
        let open_time = if row.is_closed { None } else { row.open_time };
        let close_time = if row.is_closed { None } else { row.close_time };

        let stored = sqlx::query_as::<_, DbOpeningHours>(
            r#"
            INSERT INTO opening_hours (day_of_week, open_time, close_time, is_closed)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (day_of_week) DO UPDATE
            SET open_time = EXCLUDED.open_time,
                close_time = EXCLUDED.close_time,
                is_closed = EXCLUDED.is_closed
            RETURNING day_of_week, open_time, close_time, is_closed
            "#,
        )
        .bind(row.day_of_week)
        .bind(open_time)
        .bind(close_time)
        .bind(row.is_closed)
        .fetch_one(pool)
        .await?;

        saved.push(stored);
    }

    Ok(saved)
}
