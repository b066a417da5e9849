pub mod fetch;
pub mod models;
