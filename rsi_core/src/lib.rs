pub mod common;
pub mod config;
pub mod kline;
pub mod math;
pub mod series;

pub use common::rsi_exception::{ErrCode, RsiException};
pub use config::rsi_config::RsiConfig;
pub use kline::candle::Candle;
pub use math::rsi::RsiPoint;
pub use series::rsi_candles_series::RsiCandlesSeries;
