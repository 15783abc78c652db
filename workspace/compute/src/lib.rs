//! Numeric side of the weather API: aggregates over forecast and history series and
//! the synthetic data served when no real provider is configured.

pub mod error;
pub mod simulation;
pub mod statistics;

pub use error::{ComputeError, Result};

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(20.456, 2), 20.46);
        assert_eq!(round_to(-3.14159, 3), -3.142);
        assert_eq!(round_to(19.96, 1), 20.0);
    }
}
