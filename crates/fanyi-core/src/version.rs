use crate::error::FormatError;

/// Whether `remote` is newer than `local`.
///
/// Both versions have their dots removed and are compared as plain integers,
/// so `1.0.10` becomes `1010`. Components with different digit counts can
/// compare unexpectedly (`1.2.9` vs `1.10.0` is `129` vs `1100`).
pub fn can_upgrade(remote: &str, local: &str) -> Result<bool, FormatError> {
    let remote = parse_flattened(remote)?;
    let local = parse_flattened(local)?;

    Ok(local < remote)
}

fn parse_flattened(version: &str) -> Result<i64, FormatError> {
    version
        .replace('.', "")
        .trim()
        .parse::<i64>()
        .map_err(|source| FormatError::InvalidVersion {
            version: version.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_upgrade() {
        assert!(can_upgrade("1.0.1", "1.0.0").unwrap());
        assert!(!can_upgrade("1.0.0", "1.0.1").unwrap());
        assert!(!can_upgrade("1.0.0", "1.0.0").unwrap());
    }

    #[test]
    fn test_digit_concatenation_is_kept() {
        assert!(can_upgrade("1.10", "1.9").unwrap());
        assert!(can_upgrade("1.10.0", "1.2.9").unwrap());
        // 1.0.10 -> 1010 vs 1.1.0 -> 110
        assert!(!can_upgrade("1.1.0", "1.0.10").unwrap());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(matches!(
            can_upgrade("1.0.a", "1.0.0"),
            Err(FormatError::InvalidVersion { ref version, .. }) if version == "1.0.a"
        ));
        assert!(can_upgrade("", "1.0.0").is_err());
        assert!(can_upgrade("1.0.0", "v1.0.0").is_err());
        assert!(can_upgrade("99999999999999999999", "1.0").is_err());
    }
}
