use crate::models::DbPerson;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_persons(pool: &Pool<Postgres>) -> Result<Vec<DbPerson>> {
    let persons = sqlx::query_as::<_, DbPerson>(
        r#"
        SELECT id, name, initials, avatar, phone, email, color
        FROM persons
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(persons)
}

pub async fn get_person_by_id(pool: &Pool<Postgres>, id: &str) -> Result<Option<DbPerson>> {
    let person = sqlx::query_as::<_, DbPerson>(
        r#"
        SELECT id, name, initials, avatar, phone, email, color
        FROM persons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if person.is_none() {
        tracing::debug!("Person not found: id={}", id);
    }

    Ok(person)
}
