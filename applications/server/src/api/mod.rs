/// API route modules
pub mod health;
pub mod library;
pub mod refresh;
