//! Clock and randomness used by enrichment, behind a trait so tests can pin both.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of the current instant and of uniform draws in `[0, 1)`.
///
/// Carried in `AppState` as `Arc<dyn Entropy>`.
pub trait Entropy: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// A uniform draw in `[0, 1)`.
    fn unit(&self) -> f64;
}

/// Wall clock plus the OS random source that backs v4 UUIDs.
pub struct SystemEntropy;

impl Entropy for SystemEntropy {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn unit(&self) -> f64 {
        // The low 62 bits of a v4 UUID are random; 53 of them fill an f64 mantissa.
        let bits = Uuid::new_v4().as_u128() as u64 & ((1u64 << 53) - 1);
        bits as f64 / (1u64 << 53) as f64
    }
}

/// Fixed clock and a fixed draw. Every call to `unit` returns the same value.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy {
    pub now: DateTime<Utc>,
    pub draw: f64,
}

#[cfg(test)]
impl Entropy for FixedEntropy {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn unit(&self) -> f64 {
        self.draw
    }
}
