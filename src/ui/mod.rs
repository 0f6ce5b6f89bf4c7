pub mod actions;
pub mod app;
pub mod clipboard_bridge;
pub mod table;
pub mod toolbar;
