use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;

use crate::common::rsi_exception::{ErrCode, RsiException};

pub const DEFAULT_LOOKBACK_PERIODS: usize = 14;

/// RSI engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsiConfig {
    pub lookback_periods: usize,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            lookback_periods: DEFAULT_LOOKBACK_PERIODS,
        }
    }
}

impl RsiConfig {
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, RsiException> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());

        // "rsi_cycle" is accepted as an alias
        let lookback_periods = match conf.get::<usize>("lookback_periods")? {
            Some(n) => n,
            None => conf
                .get::<usize>("rsi_cycle")?
                .unwrap_or(DEFAULT_LOOKBACK_PERIODS),
        };
        conf.check()?;

        Self::with_lookback(lookback_periods)
    }

    pub fn with_lookback(lookback_periods: usize) -> Result<Self, RsiException> {
        if lookback_periods == 0 {
            return Err(RsiException::new(
                "lookback_periods must be at least 1",
                ErrCode::ParaError,
            ));
        }
        Ok(Self { lookback_periods })
    }
}

/// Key/value config that remembers which keys were read, so leftovers can be
/// reported as unknown parameters.
#[derive(Debug)]
pub struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
    visited: HashSet<String>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self {
            conf,
            visited: HashSet::new(),
        }
    }

    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, RsiException> {
        let Some(value) = self.conf.get(key) else {
            return Ok(None);
        };
        self.visited.insert(key.to_string());
        serde_json::from_value(value.clone()).map(Some).map_err(|e| {
            RsiException::new(
                format!("invalid value for {}: {} ({})", key, value, e),
                ErrCode::ConfigError,
            )
        })
    }

    pub fn check(&self) -> Result<(), RsiException> {
        let mut unknown: Vec<&String> = self
            .conf
            .keys()
            .filter(|k| !self.visited.contains(*k))
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort();
        Err(RsiException::new(
            format!("unknown para = {:?}", unknown),
            ErrCode::ParaError,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conf(pairs: &[(&str, serde_json::Value)]) -> Option<HashMap<String, serde_json::Value>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_default() {
        assert_eq!(RsiConfig::new(None).unwrap().lookback_periods, 14);
        assert_eq!(RsiConfig::default().lookback_periods, 14);
    }

    #[test]
    fn test_lookback_keys() {
        let c = RsiConfig::new(conf(&[("lookback_periods", json!(5))])).unwrap();
        assert_eq!(c.lookback_periods, 5);
        let c = RsiConfig::new(conf(&[("rsi_cycle", json!(9))])).unwrap();
        assert_eq!(c.lookback_periods, 9);
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let err = RsiConfig::new(conf(&[("lookback_periods", json!(0))])).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
    }

    #[test]
    fn test_bad_value_rejected() {
        let err = RsiConfig::new(conf(&[("lookback_periods", json!("ten"))])).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
        let err = RsiConfig::new(conf(&[("lookback_periods", json!(-3))])).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RsiConfig::new(conf(&[("macd", json!(12))])).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
        assert!(err.msg.contains("macd"));
    }
}
