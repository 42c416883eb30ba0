use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Columns selected for every guest query, in table order.
pub(crate) const GUEST_COLUMNS: &str = "id, ad, soyad, tc_pasaport_no, telefon, email, \
     giris_tarihi_saati, cikis_tarihi_saati, oda_no";

/// One stay in the `misafirler` table. Serialized with the column names so
/// exports stay readable next to the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Guest {
    pub id: i64,
    #[serde(rename = "ad")]
    #[sqlx(rename = "ad")]
    pub first_name: String,
    #[serde(rename = "soyad")]
    #[sqlx(rename = "soyad")]
    pub last_name: String,
    #[serde(rename = "tc_pasaport_no")]
    #[sqlx(rename = "tc_pasaport_no")]
    pub national_id: Option<String>,
    #[serde(rename = "telefon")]
    #[sqlx(rename = "telefon")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "giris_tarihi_saati")]
    #[sqlx(rename = "giris_tarihi_saati")]
    pub check_in: String,
    #[serde(rename = "cikis_tarihi_saati")]
    #[sqlx(rename = "cikis_tarihi_saati")]
    pub check_out: Option<String>,
    #[serde(rename = "oda_no")]
    #[sqlx(rename = "oda_no")]
    pub room_number: Option<String>,
}

/// Field values written by an insert or a full-overwrite update. Missing
/// optional fields are empty strings, never NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestInput {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub check_in: String,
    pub check_out: String,
    pub room_number: String,
}
