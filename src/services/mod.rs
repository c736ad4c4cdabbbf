pub mod auth;
pub mod journal;
