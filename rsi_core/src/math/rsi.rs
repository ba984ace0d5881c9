use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::common::enums::PriceTrack;
use crate::kline::candle::Candle;
use crate::math::wilder::WilderAvg;

/// RSI values for one candle. The four fields stay `None` until the series
/// has more than `lookback_periods` candles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RsiPoint {
    pub time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
}

impl RsiPoint {
    pub fn bare(time: i64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn get(&self, track: PriceTrack) -> Option<f64> {
        match track {
            PriceTrack::Open => self.open,
            PriceTrack::High => self.high,
            PriceTrack::Low => self.low,
            PriceTrack::Close => self.close,
        }
    }

    pub fn set(&mut self, track: PriceTrack, value: f64) {
        let slot = match track {
            PriceTrack::Open => &mut self.open,
            PriceTrack::High => &mut self.high,
            PriceTrack::Low => &mut self.low,
            PriceTrack::Close => &mut self.close,
        };
        *slot = Some(value);
    }

    pub fn is_warm(&self) -> bool {
        PriceTrack::iter().all(|t| self.get(t).is_some())
    }
}

/// Apply one bar to the close-track averages.
///
/// Every track is measured against `prev.close` and smoothed from the same
/// `avg`. Only the close track's smoothed averages are returned for the next
/// bar; open/high/low are one-step projections.
pub fn rsi_step(cur: &Candle, prev: &Candle, avg: WilderAvg, period: usize) -> (RsiPoint, WilderAvg) {
    let mut point = RsiPoint::bare(cur.time);
    let mut next = avg;

    for track in PriceTrack::iter() {
        let smoothed = avg.smooth(cur.price(track) - prev.close, period);
        point.set(track, smoothed.rsi());
        if track == PriceTrack::Close {
            next = smoothed;
        }
    }

    (point, next)
}
