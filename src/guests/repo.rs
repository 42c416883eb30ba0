use sqlx::SqliteConnection;

use crate::guests::filter::GuestFilter;
use crate::guests::repo_types::{Guest, GuestInput, GUEST_COLUMNS};

pub async fn insert(conn: &mut SqliteConnection, input: &GuestInput) -> Result<Guest, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        r#"
        INSERT INTO misafirler (ad, soyad, tc_pasaport_no, telefon, email,
                                giris_tarihi_saati, cikis_tarihi_saati, oda_no)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {GUEST_COLUMNS}
        "#
    ))
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.national_id)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.check_in)
    .bind(&input.check_out)
    .bind(&input.room_number)
    .fetch_one(&mut *conn)
    .await
}

/// Overwrites every field of the record. `None` when the id does not exist.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    input: &GuestInput,
) -> Result<Option<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        r#"
        UPDATE misafirler SET
            ad = ?, soyad = ?, tc_pasaport_no = ?, telefon = ?, email = ?,
            giris_tarihi_saati = ?, cikis_tarihi_saati = ?, oda_no = ?
        WHERE id = ?
        RETURNING {GUEST_COLUMNS}
        "#
    ))
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.national_id)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.check_in)
    .bind(&input.check_out)
    .bind(&input.room_number)
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// Returns the number of deleted rows (0 or 1).
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
    let res = sqlx::query("DELETE FROM misafirler WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected())
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        "SELECT {GUEST_COLUMNS} FROM misafirler WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

/// All records, latest check-in first. Check-in is compared as text.
pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        "SELECT {GUEST_COLUMNS} FROM misafirler ORDER BY giris_tarihi_saati DESC, id DESC"
    ))
    .fetch_all(&mut *conn)
    .await
}

/// All records in insertion order.
pub async fn list_by_id(conn: &mut SqliteConnection) -> Result<Vec<Guest>, sqlx::Error> {
    sqlx::query_as::<_, Guest>(&format!(
        "SELECT {GUEST_COLUMNS} FROM misafirler ORDER BY id"
    ))
    .fetch_all(&mut *conn)
    .await
}

pub async fn filter(
    conn: &mut SqliteConnection,
    filter: &GuestFilter,
) -> Result<Vec<Guest>, sqlx::Error> {
    let mut qb = filter.build_query();
    qb.build_query_as::<Guest>().fetch_all(&mut *conn).await
}
