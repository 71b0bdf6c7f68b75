//! Price layer configuration constants.

/// Default lifetime of a cache entry before it is eligible for refresh.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes

/// Default interval between background refresh cycles.
///
/// A cached value can therefore be served up to one full interval out of
/// date under normal operation.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300; // 5 minutes
