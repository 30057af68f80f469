use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("out-of-order candle: time {time} is behind window tail {last}")]
    OutOfOrderCandle { time: i64, last: i64 },

    #[error("invalid candle: {0}")]
    InvalidCandle(String),
}
