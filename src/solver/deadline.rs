//! Wall-clock budget shared by the solvers.

use std::time::{Duration, Instant};

/// A point in time after which a solver must stop and return its best tour.
///
/// Expiry is never an error: it only ends the search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tour::solver::Deadline;
///
/// let d = Deadline::after(Duration::from_secs(5));
/// assert!(!d.expired());
/// assert!(d.remaining() <= Duration::from_secs(5));
///
/// let half = d.split(0.5);
/// assert!(half.remaining() <= Duration::from_millis(2500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline at a fixed instant.
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self::at(Instant::now() + budget)
    }

    /// A deadline that is already past.
    pub fn expired_now() -> Self {
        Self::at(Instant::now())
    }

    /// Returns `true` once the deadline has passed.
    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Time left, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// A deadline covering `fraction` of the remaining time, starting now.
    pub fn split(&self, fraction: f64) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        Self::after(self.remaining().mul_f64(fraction))
    }

    /// The instant this deadline expires.
    pub fn instant(&self) -> Instant {
        self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_now() {
        let d = Deadline::expired_now();
        assert!(d.expired());
        assert_eq!(d.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_split_never_exceeds_parent() {
        let d = Deadline::after(Duration::from_secs(2));
        let part = d.split(0.5);
        assert!(part.instant() <= d.instant());
        let all = d.split(3.0);
        assert!(all.instant() <= d.instant() + Duration::from_millis(1));
    }

    #[test]
    fn test_split_of_expired_is_expired() {
        let d = Deadline::expired_now().split(0.5);
        assert!(d.expired());
    }
}
