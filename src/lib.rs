#![allow(non_snake_case)]

pub mod config;
pub mod events;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod runtime;
pub mod service;
pub mod storage;
pub mod tasks;
