use serde::{Deserialize, Serialize};

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "kullanici_adi")]
    pub username: String,
    #[serde(rename = "sifre")]
    pub password: String,
}

/// Registration form body.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(rename = "kullanici_adi")]
    pub username: String,
    #[serde(rename = "sifre")]
    pub password: String,
}

/// Data of the landing page.
#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub username: String,
}
