pub mod env_check;
pub mod hostname;
pub mod logging;
