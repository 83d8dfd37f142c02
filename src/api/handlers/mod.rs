pub mod callback;
pub mod check_auth;
pub mod health;
pub mod login;
pub mod logout;
pub mod social;
pub mod types;
