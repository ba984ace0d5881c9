pub mod rsi_config;
