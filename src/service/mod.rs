pub mod notification_service;
pub mod resolver;
pub mod routing;
pub mod schedule_service;
pub mod time_parser;
