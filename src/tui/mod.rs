pub mod app;
pub mod debounce;
pub mod handlers;
pub mod row;
pub mod search;
pub mod selection;
pub mod ui;
