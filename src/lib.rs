pub mod config;
pub mod logging;
pub mod output;
pub mod shipping;
pub mod users;
