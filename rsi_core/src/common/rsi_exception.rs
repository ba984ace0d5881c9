use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the RSI engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // General errors (0-99)
    #[strum(serialize = "_RSI_ERR_BEGIN")]
    RsiErrBegin = 0,
    #[strum(serialize = "COMMON_ERROR")]
    CommonError = 1,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "_RSI_ERR_END")]
    RsiErrEnd = 99,

    // KL data errors (200-299)
    #[strum(serialize = "_KL_ERR_BEGIN")]
    KlErrBegin = 200,
    #[strum(serialize = "PRECEDED_HISTORY_VIOLATION")]
    PrecededHistoryViolation = 201,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 202,
    #[strum(serialize = "KL_NOT_MONOTONOUS")]
    KlNotMonotonous = 206,
    #[strum(serialize = "_KL_ERR_END")]
    KlErrEnd = 299,
}

impl ErrCode {
    pub fn is_kldata_err(&self) -> bool {
        let code = *self as i32;
        code > Self::KlErrBegin as i32 && code < Self::KlErrEnd as i32
    }

    pub fn is_rsi_err(&self) -> bool {
        let code = *self as i32;
        code > Self::RsiErrBegin as i32 && code < Self::RsiErrEnd as i32
    }
}

#[derive(Debug, Clone, Error)]
#[error("{errcode}: {msg}")]
pub struct RsiException {
    pub errcode: ErrCode,
    pub msg: String,
}

impl RsiException {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn is_kldata_err(&self) -> bool {
        self.errcode.is_kldata_err()
    }

    pub fn is_rsi_err(&self) -> bool {
        self.errcode.is_rsi_err()
    }
}
