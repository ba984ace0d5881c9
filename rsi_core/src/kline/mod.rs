pub mod candle;
