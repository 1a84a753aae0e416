pub mod config;
pub mod error;
pub mod i18n;
