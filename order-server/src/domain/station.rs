//! Station code types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A short code grouping every platform of one rail station.
///
/// Codes are 2 to 5 uppercase ASCII letters or digits (e.g. `WTS`, `TST`).
/// Platform stop ids embed the code, so several platforms serving different
/// lines share one `StationCode`.
///
/// # Examples
///
/// ```
/// use order_server::domain::StationCode;
///
/// let wts = StationCode::parse("WTS").unwrap();
/// assert_eq!(wts.as_str(), "WTS");
///
/// assert!(StationCode::parse("wts").is_err());
/// assert!(StationCode::parse("W").is_err());
/// assert_eq!(StationCode::parse_normalized(" tst ").unwrap().as_str(), "TST");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code, which must already be uppercase.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if !(2..=5).contains(&s.len()) {
            return Err(InvalidStationCode {
                reason: "must be 2 to 5 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(Self(s.to_string()))
    }

    /// Parse user- or config-supplied text: trims and uppercases first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Extract the code embedded in a platform stop id.
    ///
    /// The id must start with `prefix`; the code is the text after the
    /// prefix up to the next `-` (`MTR-WTS-2` → `WTS`).
    pub fn from_platform_id(stop_id: &str, prefix: &str) -> Option<Self> {
        let rest = stop_id.strip_prefix(prefix)?;
        let code = rest.split('-').next()?;
        Self::parse(code).ok()
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for StationCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("WTS").is_ok());
        assert!(StationCode::parse("TST").is_ok());
        assert!(StationCode::parse("HK").is_ok());
        assert!(StationCode::parse("A1B2C").is_ok());
    }

    #[test]
    fn reject_lowercase_and_symbols() {
        assert!(StationCode::parse("wts").is_err());
        assert!(StationCode::parse("W-S").is_err());
        assert!(StationCode::parse("W S").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("W").is_err());
        assert!(StationCode::parse("ABCDEF").is_err());
    }

    #[test]
    fn normalized_parse_trims_and_uppercases() {
        let code = StationCode::parse_normalized("  kwt\t").unwrap();
        assert_eq!(code.as_str(), "KWT");
    }

    #[test]
    fn code_from_platform_id() {
        let code = StationCode::from_platform_id("MTR-WTS-2", "MTR-").unwrap();
        assert_eq!(code.as_str(), "WTS");

        let bare = StationCode::from_platform_id("MTR-TST", "MTR-").unwrap();
        assert_eq!(bare.as_str(), "TST");

        assert!(StationCode::from_platform_id("KMB-WTS-2", "MTR-").is_none());
        assert!(StationCode::from_platform_id("MTR--2", "MTR-").is_none());
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("LAT").unwrap();
        assert_eq!(code.to_string(), "LAT");
        assert_eq!(format!("{:?}", code), "StationCode(LAT)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any well-formed code parses and round-trips through as_str
        #[test]
        fn roundtrip(s in "[A-Z0-9]{2,5}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// The embedded code survives any platform suffix
        #[test]
        fn platform_suffix_ignored(code in "[A-Z]{3}", suffix in "[A-Z0-9]{1,4}") {
            let id = format!("MTR-{code}-{suffix}");
            let parsed = StationCode::from_platform_id(&id, "MTR-").unwrap();
            prop_assert_eq!(parsed.as_str(), code.as_str());
        }
    }
}
