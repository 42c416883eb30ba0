pub mod dto;
pub mod extractors;
pub mod guard;
pub mod keys;

pub use dto::{FlashCategory, SessionData};
pub use extractors::Session;
pub use guard::{require_session, CurrentUser};
pub use keys::SessionKeys;
