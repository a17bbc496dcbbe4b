/// Client-side limit for a whole bulk upload, in milliseconds (10 minutes).
pub const UPLOAD_TIMEOUT_MS: u32 = 10 * 60 * 1000;

/// Retry schedule for transient read errors on the upload response stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
        }
    }
}

impl RetryPolicy {
    /// Delay before the next attempt after `failed_attempts` failures, or
    /// `None` when attempts are exhausted.
    pub fn delay_after(&self, failed_attempts: u32) -> Option<u32> {
        if failed_attempts == 0 || failed_attempts >= self.max_attempts {
            return None;
        }
        let factor = 1u32.checked_shl(failed_attempts - 1)?;
        Some(self.base_delay_ms.saturating_mul(factor))
    }

    /// Like [`delay_after`](Self::delay_after), but never retries a request
    /// that was aborted on purpose.
    pub fn retry_read(&self, failed_attempts: u32, aborted: bool) -> Option<u32> {
        if aborted {
            return None;
        }
        self.delay_after(failed_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Some(500));
        assert_eq!(policy.delay_after(2), Some(1000));
        assert_eq!(policy.delay_after(3), None);
        assert_eq!(policy.delay_after(0), None);
    }

    #[test]
    fn test_large_attempt_counts_do_not_overflow() {
        let policy = RetryPolicy {
            max_attempts: 100,
            base_delay_ms: 500,
        };
        assert_eq!(policy.delay_after(40), None);
        assert_eq!(policy.delay_after(30), Some(u32::MAX));
    }

    #[test]
    fn test_aborted_read_is_not_retried() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retry_read(1, false), Some(500));
        assert_eq!(policy.retry_read(1, true), None);
        assert_eq!(policy.retry_read(2, true), None);
    }
}
