pub mod admin;
pub mod auth;
pub mod availability;
pub mod blocked_date;
pub mod budget;
pub mod health;
pub mod portfolio;
pub mod public;
