use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};

/// Visit count for one day, week or month. `period` is NULL for check-ins
/// SQLite cannot read as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DensityRow {
    pub period: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    fn period_expr(self) -> &'static str {
        match self {
            Granularity::Daily => "DATE(giris_tarihi_saati)",
            // %W: Monday-based week of the year, 00-53.
            Granularity::Weekly => "STRFTIME('%Y-%W', giris_tarihi_saati)",
            Granularity::Monthly => "STRFTIME('%Y-%m', giris_tarihi_saati)",
        }
    }
}

/// Counts check-ins per period, latest period first.
pub async fn density(
    conn: &mut SqliteConnection,
    granularity: Granularity,
) -> Result<Vec<DensityRow>, sqlx::Error> {
    sqlx::query_as::<_, DensityRow>(&format!(
        r#"
        SELECT {} AS period, COUNT(*) AS count
        FROM misafirler
        GROUP BY period
        ORDER BY period DESC
        "#,
        granularity.period_expr()
    ))
    .fetch_all(&mut *conn)
    .await
}

pub async fn daily(conn: &mut SqliteConnection) -> Result<Vec<DensityRow>, sqlx::Error> {
    density(conn, Granularity::Daily).await
}

pub async fn weekly(conn: &mut SqliteConnection) -> Result<Vec<DensityRow>, sqlx::Error> {
    density(conn, Granularity::Weekly).await
}

pub async fn monthly(conn: &mut SqliteConnection) -> Result<Vec<DensityRow>, sqlx::Error> {
    density(conn, Granularity::Monthly).await
}
