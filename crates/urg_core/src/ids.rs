use crate::error::AppError;

const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Build a record identifier shaped `{prefix}_{unix_ms}_{suffix}`.
///
/// Uniqueness is probabilistic only; two ids minted in the same millisecond differ by their
/// 9-character base-36 suffix.
pub fn record_id(prefix: &str, unix_ms: i64) -> Result<String, AppError> {
    Ok(format!("{prefix}_{unix_ms}_{}", random_suffix()?))
}

fn random_suffix() -> Result<String, AppError> {
    let mut buf = [0u8; SUFFIX_LEN];
    getrandom::getrandom(&mut buf).map_err(|e| {
        AppError::new("ID_RANDOM_FAILED", "Failed to read OS randomness for record id")
            .with_details(e.to_string())
            .with_retryable(true)
    })?;
    Ok(buf
        .iter()
        .map(|b| SUFFIX_ALPHABET[usize::from(*b) % SUFFIX_ALPHABET.len()] as char)
        .collect())
}
