/// Number of rows a ranking returns when the caller does not ask for a size.
pub const DEFAULT_TOP_K: i64 = 10;

/// Converts a requested ranking size into a row limit. Negative sizes become
/// zero; sizes too large for `usize` saturate so they still mean "everything".
pub fn clamp_k(k: i64) -> usize {
    usize::try_from(k.max(0)).unwrap_or(usize::MAX)
}
