pub mod clipboard;
pub mod data_model;
pub mod grid;
pub mod i18n;
pub mod post_data;
pub mod selection;
pub mod serializer;
pub mod settings;
pub mod sync;
pub mod table_maker;
