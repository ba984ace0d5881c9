pub mod rsi_candles_series;
