use std::num::ParseIntError;

use serde::{Deserialize, Serialize};

use crate::guests::filter::GuestFilter;
use crate::guests::repo_types::{Guest, GuestInput};

/// Body of `POST /kayit`. A non-empty `misafir_id` turns the request into
/// an update.
#[derive(Debug, Deserialize)]
pub struct GuestForm {
    #[serde(rename = "misafir_id", default)]
    pub id: Option<String>,
    #[serde(rename = "ad")]
    pub first_name: String,
    #[serde(rename = "soyad", default)]
    pub last_name: String,
    #[serde(rename = "tc_pasaport_no", default)]
    pub national_id: String,
    #[serde(rename = "telefon", default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "ziyaret_tarihi")]
    pub check_in: String,
    #[serde(rename = "cikis_tarihi", default)]
    pub check_out: String,
    #[serde(rename = "oda_no", default)]
    pub room_number: String,
}

impl GuestForm {
    pub fn record_id(&self) -> Result<Option<i64>, ParseIntError> {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.parse().map(Some),
            _ => Ok(None),
        }
    }

    pub fn into_input(self) -> GuestInput {
        GuestInput {
            first_name: self.first_name,
            last_name: self.last_name,
            national_id: self.national_id,
            phone: self.phone,
            email: self.email,
            check_in: self.check_in,
            check_out: self.check_out,
            room_number: self.room_number,
        }
    }
}

/// Body of `POST /filtreleme`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    #[serde(rename = "ad", default)]
    pub first_name: String,
    #[serde(rename = "soyad", default)]
    pub last_name: String,
    #[serde(rename = "giris_tarihi", default)]
    pub check_in: String,
    #[serde(rename = "cikis_tarihi", default)]
    pub check_out: String,
}

impl From<&FilterForm> for GuestFilter {
    fn from(form: &FilterForm) -> Self {
        GuestFilter::new(
            &form.first_name,
            &form.last_name,
            &form.check_in,
            &form.check_out,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct GuestListPage {
    #[serde(rename = "ziyaretciler")]
    pub guests: Vec<Guest>,
}

#[derive(Debug, Serialize)]
pub struct GuestFormPage {
    #[serde(rename = "misafir")]
    pub guest: Option<Guest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(id: Option<&str>) -> GuestForm {
        GuestForm {
            id: id.map(str::to_owned),
            first_name: "Ayşe".into(),
            last_name: String::new(),
            national_id: String::new(),
            phone: String::new(),
            email: String::new(),
            check_in: "2024-05-01T10:00".into(),
            check_out: String::new(),
            room_number: String::new(),
        }
    }

    #[test]
    fn empty_id_means_insert() {
        assert_eq!(form(None).record_id(), Ok(None));
        assert_eq!(form(Some("")).record_id(), Ok(None));
        assert_eq!(form(Some("  ")).record_id(), Ok(None));
    }

    #[test]
    fn numeric_id_means_update() {
        assert_eq!(form(Some("12")).record_id(), Ok(Some(12)));
        assert!(form(Some("abc")).record_id().is_err());
    }
}
