use strum_macros::{Display, EnumIter, EnumString};

/// Price component of a candle that an RSI value is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PriceTrack {
    Open,
    High,
    Low,
    Close,
}
