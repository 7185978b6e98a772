pub mod command;
pub mod csrf;
pub mod database_validator;
