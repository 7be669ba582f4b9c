use crate::models::DbStaff;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_active_staff(pool: &Pool<Postgres>) -> Result<Vec<DbStaff>> {
    let staff = sqlx::query_as::<_, DbStaff>(
        r#"
        SELECT id, display_name, active, created_at
        FROM staff
        WHERE active
        ORDER BY display_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(staff)
}

pub async fn get_staff_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbStaff>> {
    let staff = sqlx::query_as::<_, DbStaff>(
        r#"
        SELECT id, display_name, active, created_at
        FROM staff
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(staff)
}
