//! Per-IP daily quota for the guest generation endpoint.
//!
//! Counters live in process memory. The first request of a new UTC day
//! sweeps every window left over from previous days, so one-off guest IPs
//! do not accumulate until restart. A restart clears all counters, which is
//! acceptable for an abuse brake on a free endpoint.

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{Datelike, NaiveDate, Utc};
use dashmap::DashMap;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

pub const GUEST_DAILY_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy)]
struct DayWindow {
    day: NaiveDate,
    count: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct GuestQuota {
    pub allowed: bool,
    pub used_today: u32,
}

#[derive(Clone, Default)]
pub struct GuestRateLimiter {
    counters: Arc<DashMap<IpAddr, DayWindow>>,
    /// Day number of the last stale-window sweep.
    swept_day: Arc<AtomicI32>,
}

impl GuestRateLimiter {
    pub fn check(&self, ip: IpAddr) -> GuestQuota {
        self.check_at(ip, Utc::now().date_naive())
    }

    fn check_at(&self, ip: IpAddr, today: NaiveDate) -> GuestQuota {
        self.evict_stale(today);

        let mut window = self.counters.entry(ip).or_insert(DayWindow {
            day: today,
            count: 0,
        });

        if window.day != today {
            window.day = today;
            window.count = 0;
        }

        window.count += 1;

        GuestQuota {
            allowed: window.count <= GUEST_DAILY_LIMIT,
            used_today: window.count,
        }
    }

    /// Drops every window from a day other than `today`. Runs once per day,
    /// on that day's first request; windows of IPs that never return would
    /// otherwise sit in the map until restart.
    fn evict_stale(&self, today: NaiveDate) {
        let day = today.num_days_from_ce();
        let swept = self.swept_day.load(Ordering::Relaxed);
        if swept == day {
            return;
        }
        if self
            .swept_day
            .compare_exchange(swept, day, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            self.counters.retain(|_, window| window.day == today);
        }
    }
}

/// Middleware for the guest generation route.
pub async fn guest_rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let quota = state.guest_limiter.check(addr.ip());

    info!(
        "Guest request from IP {} ({}/{} today)",
        addr.ip(),
        quota.used_today,
        GUEST_DAILY_LIMIT
    );

    if !quota.allowed {
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_allows_up_to_daily_limit() {
        let limiter = GuestRateLimiter::default();

        for n in 1..=GUEST_DAILY_LIMIT {
            let quota = limiter.check_at(ip(1), day(1));
            assert!(quota.allowed, "request {n} should be allowed");
            assert_eq!(quota.used_today, n);
        }
    }

    #[test]
    fn test_denies_after_limit_exceeded() {
        let limiter = GuestRateLimiter::default();

        for _ in 0..GUEST_DAILY_LIMIT {
            limiter.check_at(ip(1), day(1));
        }

        let quota = limiter.check_at(ip(1), day(1));
        assert!(!quota.allowed, "sixth request on the same day must be denied");
        assert_eq!(quota.used_today, GUEST_DAILY_LIMIT + 1);
    }

    #[test]
    fn test_window_resets_on_new_day() {
        let limiter = GuestRateLimiter::default();

        for _ in 0..=GUEST_DAILY_LIMIT {
            limiter.check_at(ip(1), day(1));
        }
        assert!(!limiter.check_at(ip(1), day(1)).allowed);

        let quota = limiter.check_at(ip(1), day(2));
        assert!(quota.allowed, "new day starts a fresh window");
        assert_eq!(quota.used_today, 1);
    }

    #[test]
    fn test_quotas_are_tracked_per_ip() {
        let limiter = GuestRateLimiter::default();

        for _ in 0..=GUEST_DAILY_LIMIT {
            limiter.check_at(ip(1), day(1));
        }
        assert!(!limiter.check_at(ip(1), day(1)).allowed);

        let quota = limiter.check_at(ip(2), day(1));
        assert!(quota.allowed, "a different IP has its own counter");
        assert_eq!(quota.used_today, 1);
    }

    #[test]
    fn test_stale_ip_windows_are_evicted_on_new_day() {
        let limiter = GuestRateLimiter::default();

        for n in 0..1000u32 {
            let [_, b, c, d] = n.to_be_bytes();
            limiter.check_at(IpAddr::from([10, b, c, d]), day(1));
        }
        assert_eq!(limiter.counters.len(), 1000);

        limiter.check_at(ip(1), day(9));

        assert_eq!(
            limiter.counters.len(),
            1,
            "windows from previous days must be dropped, not kept until restart"
        );
    }

    #[test]
    fn test_eviction_spares_windows_from_the_current_day() {
        let limiter = GuestRateLimiter::default();

        for _ in 0..GUEST_DAILY_LIMIT {
            limiter.check_at(ip(1), day(2));
        }
        limiter.check_at(ip(2), day(2));

        assert!(
            !limiter.check_at(ip(1), day(2)).allowed,
            "same-day counts must survive intervening requests from other IPs"
        );
    }
}
