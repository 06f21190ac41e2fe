pub mod command;
pub mod schedule;
pub mod slot;
