//! Clock text and progress scaling helpers.

/// Formats a millisecond duration as `MM:SS`.
///
/// Sub-second remainders are truncated. Minutes are zero-padded to two
/// digits and grow past two digits only at 100 minutes or more.
pub fn format_clock(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Maps a progress fraction onto an integer scale (e.g. `0..=10000`), truncating.
pub fn scale_progress(fraction: f64, scale: u32) -> u32 {
    if !fraction.is_finite() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * f64::from(scale)) as u32
}
