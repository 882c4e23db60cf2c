//! Sentry threshold (`dSen`) computation.

/// Last protocol version using the legacy exponential formula.
pub const LEGACY_FORMULA_MAX_VERSION: u32 = 3;

/// Protocol version assumed when no network head is available.
pub const DEFAULT_PROTOCOL_VERSION: u32 = 10;

/// Compute the sentry qualification threshold for a network of
/// `members_count` members.
///
/// - protocol version <= 3: `ceil(dsen_p * exp(ln(members_count) / step_max))`
/// - protocol version >= 4: `ceil(members_count ^ (1 / step_max))`
///
/// An empty network yields 0, which makes every confirmed node a sentry.
pub fn sentry_threshold(members_count: u64, step_max: u32, version: u32, dsen_p: f64) -> u32 {
    if members_count == 0 {
        return 0;
    }
    let n = members_count as f64;
    let k = f64::from(step_max.max(1));

    let raw = if version <= LEGACY_FORMULA_MAX_VERSION {
        dsen_p * (n.ln() / k).exp()
    } else {
        n.powf(1.0 / k)
    };

    let threshold = raw.ceil();
    tracing::trace!(members_count, step_max, version, threshold, "computed dSen");
    threshold as u32
}
