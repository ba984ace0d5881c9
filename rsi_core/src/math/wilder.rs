/// Relative strength used when the average loss is exactly zero.
pub const ZERO_LOSS_RS: f64 = 100.0;

/// Average gain/loss pair smoothed with Wilder's method.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WilderAvg {
    pub gain: f64,
    pub loss: f64,
}

impl WilderAvg {
    pub fn new(gain: f64, loss: f64) -> Self {
        Self { gain, loss }
    }

    /// Bootstrap averages from a run of closes.
    ///
    /// Sums the close-to-close gains and losses of `closes` and divides by
    /// `period`, not by the number of differences.
    pub fn seed<I>(closes: I, period: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut total_gain = 0.0;
        let mut total_loss = 0.0;
        let mut prev: Option<f64> = None;

        for close in closes {
            if let Some(p) = prev {
                let (gain, loss) = split_change(close - p);
                total_gain += gain;
                total_loss += loss;
            }
            prev = Some(close);
        }

        Self {
            gain: total_gain / period as f64,
            loss: total_loss / period as f64,
        }
    }

    /// One smoothing step: `(avg * (period - 1) + value) / period`.
    pub fn smooth(&self, change: f64, period: usize) -> Self {
        let (gain, loss) = split_change(change);
        let n = period as f64;
        Self {
            gain: (self.gain * (n - 1.0) + gain) / n,
            loss: (self.loss * (n - 1.0) + loss) / n,
        }
    }

    pub fn rsi(&self) -> f64 {
        let rs = if self.loss == 0.0 {
            ZERO_LOSS_RS
        } else {
            self.gain / self.loss
        };
        100.0 - 100.0 / (1.0 + rs)
    }
}

/// Split a price change into its (gain, loss) parts, both non-negative.
pub fn split_change(change: f64) -> (f64, f64) {
    (change.max(0.0), (-change).max(0.0))
}

/// Two-slot ring holding the current averages and the averages in effect
/// before the last bar was applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvgRing {
    slots: [WilderAvg; 2],
    cur: usize,
}

impl AvgRing {
    /// Both slots set to `avg`.
    pub fn reset(&mut self, avg: WilderAvg) {
        self.slots = [avg, avg];
        self.cur = 0;
    }

    pub fn current(&self) -> WilderAvg {
        self.slots[self.cur]
    }

    pub fn previous(&self) -> WilderAvg {
        self.slots[self.cur ^ 1]
    }

    pub fn set_current(&mut self, avg: WilderAvg) {
        self.slots[self.cur] = avg;
    }

    /// Make the current averages the rollback point for the next bar.
    pub fn advance(&mut self) {
        let snapshot = self.current();
        self.cur ^= 1;
        self.slots[self.cur] = snapshot;
    }

    /// Discard the effect of the last bar.
    pub fn rollback(&mut self) {
        self.slots[self.cur] = self.previous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_change() {
        assert_eq!(split_change(2.5), (2.5, 0.0));
        assert_eq!(split_change(-1.5), (0.0, 1.5));
        assert_eq!(split_change(0.0), (0.0, 0.0));
    }

    #[test]
    fn test_seed_divides_by_period() {
        // diffs: +2, -1, +3 over period 4
        let avg = WilderAvg::seed([10.0, 12.0, 11.0, 14.0], 4);
        assert_eq!(avg, WilderAvg::new(5.0 / 4.0, 1.0 / 4.0));
    }

    #[test]
    fn test_seed_single_close() {
        assert_eq!(WilderAvg::seed([10.0], 1), WilderAvg::default());
    }

    #[test]
    fn test_smooth() {
        let avg = WilderAvg::new(1.0, 0.0).smooth(-1.0, 2);
        assert_eq!(avg, WilderAvg::new(0.5, 0.5));
        assert_eq!(avg.rsi(), 50.0);
        let avg = avg.smooth(3.0, 2);
        assert_eq!(avg, WilderAvg::new(1.75, 0.25));
        assert_eq!(avg.rsi(), 87.5);
    }

    #[test]
    fn test_zero_loss_uses_fixed_rs() {
        let rsi = WilderAvg::new(2.0, 0.0).rsi();
        assert_eq!(rsi, 100.0 - 100.0 / (1.0 + ZERO_LOSS_RS));
        assert!(rsi > 99.0 && rsi < 100.0);
        assert_eq!(WilderAvg::new(0.0, 2.0).rsi(), 0.0);
    }

    #[test]
    fn test_ring_advance_and_rollback() {
        let mut ring = AvgRing::default();
        ring.reset(WilderAvg::new(1.0, 1.0));
        ring.advance();
        ring.set_current(WilderAvg::new(2.0, 0.5));
        assert_eq!(ring.previous(), WilderAvg::new(1.0, 1.0));
        assert_eq!(ring.current(), WilderAvg::new(2.0, 0.5));

        ring.rollback();
        assert_eq!(ring.current(), WilderAvg::new(1.0, 1.0));

        ring.set_current(WilderAvg::new(3.0, 0.0));
        ring.advance();
        assert_eq!(ring.previous(), WilderAvg::new(3.0, 0.0));
        assert_eq!(ring.current(), WilderAvg::new(3.0, 0.0));
    }
}
