pub mod app_builder;
pub mod auth;
