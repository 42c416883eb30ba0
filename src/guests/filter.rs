use sqlx::{QueryBuilder, Sqlite};

use crate::guests::repo_types::GUEST_COLUMNS;

/// Columns a guest filter may narrow on. Only these fixed names ever reach
/// the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FirstName,
    LastName,
    CheckIn,
    CheckOut,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Column::FirstName => "ad",
            Column::LastName => "soyad",
            Column::CheckIn => "giris_tarihi_saati",
            Column::CheckOut => "cikis_tarihi_saati",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-sensitive substring match anywhere in the column.
    Contains(Column, String),
    /// Case-sensitive prefix match.
    StartsWith(Column, String),
}

impl Predicate {
    // `instr` is case-sensitive where LIKE is not, and is NULL on NULL columns.
    fn push(&self, qb: &mut QueryBuilder<'static, Sqlite>) {
        match self {
            Predicate::Contains(column, needle) => {
                qb.push(" AND instr(")
                    .push(column.as_sql())
                    .push(", ")
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
            Predicate::StartsWith(column, prefix) => {
                qb.push(" AND instr(")
                    .push(column.as_sql())
                    .push(", ")
                    .push_bind(prefix.clone())
                    .push(") = 1");
            }
        }
    }
}

/// Optional criteria of the guest search form; each present field narrows
/// the result, absent fields impose nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub check_in_prefix: Option<String>,
    pub check_out_prefix: Option<String>,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl GuestFilter {
    /// Trims every input; blank inputs count as omitted.
    pub fn new(first_name: &str, last_name: &str, check_in: &str, check_out: &str) -> Self {
        Self {
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
            check_in_prefix: non_blank(check_in),
            check_out_prefix: non_blank(check_out),
        }
    }

    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(v) = &self.first_name {
            out.push(Predicate::Contains(Column::FirstName, v.clone()));
        }
        if let Some(v) = &self.last_name {
            out.push(Predicate::Contains(Column::LastName, v.clone()));
        }
        if let Some(v) = &self.check_in_prefix {
            out.push(Predicate::StartsWith(Column::CheckIn, v.clone()));
        }
        if let Some(v) = &self.check_out_prefix {
            out.push(Predicate::StartsWith(Column::CheckOut, v.clone()));
        }
        out
    }

    pub fn build_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(format!("SELECT {GUEST_COLUMNS} FROM misafirler WHERE 1=1"));
        for predicate in self.predicates() {
            predicate.push(&mut qb);
        }
        qb.push(" ORDER BY giris_tarihi_saati DESC, id DESC");
        qb
    }
}
