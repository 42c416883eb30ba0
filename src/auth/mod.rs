use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn public_router() -> Router<AppState> {
    handlers::public_routes()
}

pub fn protected_router() -> Router<AppState> {
    handlers::protected_routes()
}
