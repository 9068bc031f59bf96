//! User accounts: registration, credential storage, verification.

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::UserError;
pub use models::{LoginRequest, RegisterRequest, User};
pub use repository::UserRepository;
pub use service::UserService;
