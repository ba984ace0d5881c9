pub mod enums;
pub mod rsi_exception;
pub mod time;
