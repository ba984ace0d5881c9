pub mod rsi;
pub mod wilder;
