use tracing::{debug, trace, warn};

use crate::common::rsi_exception::{ErrCode, RsiException};
use crate::config::rsi_config::RsiConfig;
use crate::kline::candle::Candle;
use crate::math::rsi::{rsi_step, RsiPoint};
use crate::math::wilder::{AvgRing, WilderAvg};

/// Incremental RSI over an OHLC candle stream.
///
/// Holds the candles, one `RsiPoint` per candle, and the close-track Wilder
/// averages. The series can be replaced wholesale (`set_data`), extended or
/// amended one bar at a time (`update`), or extended backwards with older
/// history (`prepend`). Incremental results are identical to a full rebuild.
#[derive(Debug, Clone)]
pub struct RsiCandlesSeries {
    lookback_periods: usize,
    candles: Vec<Candle>,
    rsi_points: Vec<RsiPoint>,
    avg: AvgRing,
}

impl Default for RsiCandlesSeries {
    fn default() -> Self {
        Self::new(&RsiConfig::default())
    }
}

impl RsiCandlesSeries {
    pub fn new(config: &RsiConfig) -> Self {
        Self {
            lookback_periods: config.lookback_periods.max(1),
            candles: Vec::new(),
            rsi_points: Vec::new(),
            avg: AvgRing::default(),
        }
    }

    pub fn with_lookback(lookback_periods: usize) -> Result<Self, RsiException> {
        Ok(Self::new(&RsiConfig::with_lookback(lookback_periods)?))
    }

    pub fn lookback_periods(&self) -> usize {
        self.lookback_periods
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// True once there are more candles than `lookback_periods`.
    pub fn is_warm(&self) -> bool {
        self.candles.len() > self.lookback_periods
    }

    /// Replace the whole series. `data` must be ascending by time; this is
    /// not checked.
    pub fn set_data(&mut self, data: &[Candle]) {
        self.candles = data.to_vec();
        self.avg = AvgRing::default();

        let mut rsi_points = Vec::with_capacity(self.candles.len());
        for idx in 0..self.candles.len() {
            rsi_points.push(self.append_point(idx));
        }
        self.rsi_points = rsi_points;

        debug!(
            candles = self.candles.len(),
            lookback = self.lookback_periods,
            warm = self.is_warm(),
            "rsi series seeded"
        );
    }

    /// Append a new bar, or amend the last one when `candle.time` equals its
    /// time.
    pub fn update(&mut self, candle: Candle) -> Result<(), RsiException> {
        if self.candles.is_empty() {
            self.candles.push(candle);
            self.rsi_points.push(RsiPoint::bare(candle.time));
            return Ok(());
        }

        let last_idx = self.candles.len() - 1;
        let last_time = self.candles[last_idx].time;

        if candle.time < last_time {
            warn!(
                time = candle.time,
                last_time,
                "rejected candle older than the forming bar"
            );
            return Err(RsiException::new(
                format!(
                    "candle time {} precedes last candle time {}",
                    candle.time, last_time
                ),
                ErrCode::PrecededHistoryViolation,
            ));
        }

        if candle.time == last_time {
            trace!(time = candle.time, close = candle.close, "amending forming bar");
            self.candles[last_idx] = candle;
            self.rsi_points[last_idx] = self.amend_point(last_idx);
        } else {
            self.candles.push(candle);
            let point = self.append_point(last_idx + 1);
            self.rsi_points.push(point);
        }

        Ok(())
    }

    /// Insert older candles ahead of the current window and rebuild.
    pub fn prepend(&mut self, history: &[Candle]) -> Result<(), RsiException> {
        let Some(hist_last) = history.last().copied() else {
            return Ok(());
        };

        if let Some(first) = self.candles.first().copied() {
            if hist_last.time >= first.time {
                warn!(
                    history_last = hist_last.time,
                    first_time = first.time,
                    "rejected history overlapping the current window"
                );
                return Err(RsiException::new(
                    format!(
                        "history ends at {} but series starts at {}",
                        hist_last.time, first.time
                    ),
                    ErrCode::KlNotMonotonous,
                ));
            }
        }

        let mut data = Vec::with_capacity(history.len() + self.candles.len());
        data.extend_from_slice(history);
        data.extend_from_slice(&self.candles);
        debug!(prepended = history.len(), "prepending history");
        self.set_data(&data);
        Ok(())
    }

    pub fn get_data(&self) -> Vec<Candle> {
        self.candles.clone()
    }

    pub fn get_rsi_data(&self) -> Vec<RsiPoint> {
        self.rsi_points.clone()
    }

    pub fn get_current_rsi_candle(&self) -> Option<RsiPoint> {
        self.rsi_points.last().copied()
    }

    /// RSI point for the candle at `idx`, computed from the averages left by
    /// the candle before it. Candles `0..lookback_periods` only carry time; the
    /// first warm candle bootstraps the averages from them.
    fn append_point(&mut self, idx: usize) -> RsiPoint {
        let n = self.lookback_periods;
        if idx < n {
            return RsiPoint::bare(self.candles[idx].time);
        }
        if idx == n {
            let seed = WilderAvg::seed(self.candles[..n].iter().map(|c| c.close), n);
            self.avg.reset(seed);
        }
        self.avg.advance();
        self.apply_bar(idx)
    }

    fn amend_point(&mut self, idx: usize) -> RsiPoint {
        if idx <= self.lookback_periods {
            return self.append_point(idx);
        }
        self.avg.rollback();
        self.apply_bar(idx)
    }

    fn apply_bar(&mut self, idx: usize) -> RsiPoint {
        let (point, next) = rsi_step(
            &self.candles[idx],
            &self.candles[idx - 1],
            self.avg.current(),
            self.lookback_periods,
        );
        self.avg.set_current(next);
        point
    }
}
