pub mod assets;
pub mod command;
pub mod logging;
pub mod response;
