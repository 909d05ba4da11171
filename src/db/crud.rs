use sqlx::{Executor, Result, Sqlite};
use uuid::Uuid;

use super::PersonRecord;

/// 添加人员记录
pub async fn add_person<'c, E>(executor: E, id: Uuid, name: &str, last_name: &str) -> Result<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO person (id, name, last_name)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(last_name)
    .execute(executor)
    .await?;

    Ok(())
}

/// 根据 ID 获取人员记录
pub async fn get_person<'c, E>(executor: E, id: Uuid) -> Result<Option<PersonRecord>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as::<_, PersonRecord>(
        r#"
        SELECT id, name, last_name, vector FROM person WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// 按创建顺序获取所有人员记录
pub async fn get_persons<'c, E>(executor: E) -> Result<Vec<PersonRecord>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_as::<_, PersonRecord>(
        r#"
        SELECT id, name, last_name, vector FROM person ORDER BY rowid
        "#,
    )
    .fetch_all(executor)
    .await
}

/// 按创建顺序获取所有人员 ID
pub async fn get_person_ids<'c, E>(executor: E) -> Result<Vec<Uuid>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar::<_, Uuid>(r#"SELECT id FROM person ORDER BY rowid"#)
        .fetch_all(executor)
        .await
}

/// 覆盖人员的向量，返回记录是否存在
pub async fn set_vector<'c, E>(executor: E, id: Uuid, vector: &[u8]) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE person SET vector = ? WHERE id = ?
        "#,
    )
    .bind(vector)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 获取人员的向量，外层 `None` 表示记录不存在，内层 `None` 表示向量未设置
pub async fn get_vector<'c, E>(executor: E, id: Uuid) -> Result<Option<Option<Vec<u8>>>>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query_scalar::<_, Option<Vec<u8>>>(r#"SELECT vector FROM person WHERE id = ?"#)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// 删除人员记录，返回记录是否存在
pub async fn delete_person<'c, E>(executor: E, id: Uuid) -> Result<bool>
where
    E: Executor<'c, Database = Sqlite>,
{
    let result = sqlx::query(r#"DELETE FROM person WHERE id = ?"#)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
