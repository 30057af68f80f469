pub mod candle;
pub mod marker;
pub mod prediction;
pub mod signal;
pub mod swing;
