// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Mac address type and logic.

use arrayvec::ArrayVec;
use std::fmt::Display;
use std::str::FromStr;

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// A [MAC Address] type.
///
/// `Mac` is a transparent wrapper around `[u8; 6]` which provides
/// type safety and the textual form used in flow entries.
///
/// The textual form is six colon separated pairs of hex digits.
/// Parsing accepts either case, [`Display`] always renders lower case.
///
/// [MAC Address]: https://en.wikipedia.org/wiki/MAC_address
#[repr(transparent)]
#[cfg_attr(any(test, feature = "bolero"), derive(bolero::TypeGenerator))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mac(pub [u8; 6]);

/// Errors which can occur while converting a string to a [`Mac`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacFromStringError {
    /// Invalid string representation of mac address
    #[error("invalid string representation of mac address: {0}")]
    Invalid(String),
}

impl TryFrom<&str> for Mac {
    type Error = MacFromStringError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        const MAX_OCTETS: usize = 6;
        let invalid = || MacFromStringError::Invalid(value.to_string());
        let octets_parsed = value.split(':').try_fold(
            ArrayVec::<u8, MAX_OCTETS>::new(),
            |mut acc, octet_str| {
                if octet_str.len() != 2 || !octet_str.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(invalid());
                }
                let parsed = u8::from_str_radix(octet_str, 16).map_err(|_| invalid())?;
                acc.try_push(parsed).map_err(|_| invalid())?;
                Ok(acc)
            },
        )?;

        let octets = octets_parsed.into_inner().map_err(|_| invalid())?;
        Ok(Mac(octets))
    }
}

impl FromStr for Mac {
    type Err = MacFromStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mac::try_from(s)
    }
}

impl Display for Mac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use bolero::{Driver, ValueGenerator};
    use std::ops::Bound;

    /// Generate valid MAC address strings in format XX:XX:XX:XX:XX:XX
    pub struct MacTestStringGenerator;
    impl ValueGenerator for MacTestStringGenerator {
        type Output = String;

        fn generate<D: Driver>(&self, u: &mut D) -> Option<Self::Output> {
            let hexchars = "0123456789abcdefABCDEF";
            (0..6)
                .map(|_| {
                    (0..2)
                        .map(|_| {
                            hexchars.chars().nth(
                                u.gen_usize(Bound::Included(&0), Bound::Excluded(&hexchars.len()))?,
                            )
                        })
                        .collect::<Option<String>>()
                })
                .collect::<Option<Vec<String>>>()
                .map(|v| v.join(":"))
        }
    }
}

#[cfg(test)]
mod test {
    use super::Mac;
    use crate::eth::mac::contract::MacTestStringGenerator;
    use std::str::FromStr;

    #[test]
    fn test_mac_from_valid_string() {
        bolero::check!()
            .with_generator(MacTestStringGenerator)
            .for_each(|input: &String| {
                let result = Mac::try_from(input.as_str());
                assert_eq!(input.to_lowercase(), result.unwrap().to_string());
            });
    }

    #[test]
    fn test_mac_display_parses_back() {
        bolero::check!().with_type().for_each(|mac: &Mac| {
            assert_eq!(Mac::from_str(&mac.to_string()).unwrap(), *mac);
        });
    }

    #[test]
    fn mac_from_string() {
        let mac = Mac::from_str("de:ad:BE:ef:de:ad").unwrap();
        assert_eq!(mac, Mac([0xde, 0xad, 0xbe, 0xef, 0xde, 0xad]));
        assert_eq!(mac.to_string(), "de:ad:be:ef:de:ad");
    }

    #[test]
    fn mac_from_string_too_many_octets() {
        assert!(Mac::try_from("00:00:00:00:00:00:00").is_err());
        assert!(Mac::try_from("00:00:00:00:00:00:00:00").is_err());
    }

    #[test]
    fn mac_from_string_too_few_octets() {
        assert!(Mac::try_from("00:00:00:00:00").is_err());
        assert!(Mac::try_from("").is_err());
    }

    #[test]
    fn mac_from_string_invalid_octet() {
        assert!(Mac::try_from("00:00:00:00:00:000").is_err());
        assert!(Mac::try_from("00:00:00:00:+0:00").is_err());
        assert!(Mac::try_from("foo").is_err());
    }
}
