use serde::{Deserialize, Serialize};

use crate::common::{enums::PriceTrack, time::CTime};

/// One OHLC bar. `time` is seconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// Bar whose four prices are all `price`.
    pub fn flat(time: i64, price: f64) -> Self {
        Self::new(time, price, price, price, price)
    }

    pub fn price(&self, track: PriceTrack) -> f64 {
        match track {
            PriceTrack::Open => self.open,
            PriceTrack::High => self.high,
            PriceTrack::Low => self.low,
            PriceTrack::Close => self.close,
        }
    }

    pub fn ctime(&self) -> Option<CTime> {
        CTime::from_timestamp(self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_by_track() {
        let c = Candle::new(60, 1.0, 4.0, 0.5, 2.0);
        assert_eq!(c.price(PriceTrack::Open), 1.0);
        assert_eq!(c.price(PriceTrack::High), 4.0);
        assert_eq!(c.price(PriceTrack::Low), 0.5);
        assert_eq!(c.price(PriceTrack::Close), 2.0);
    }

    #[test]
    fn test_serde_shape() {
        let c = Candle::flat(1_709_596_800, 10.5);
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["time"], 1_709_596_800);
        assert_eq!(json["close"], 10.5);
        let back: Candle = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
        assert_eq!(c.ctime().unwrap().to_string(), "2024/03/05");
    }
}
