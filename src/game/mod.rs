pub mod command;
pub mod constants;
pub mod entity;
pub mod store;
pub mod tick;
pub mod visibility;
