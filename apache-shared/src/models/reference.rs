use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one live booking and the traveler record attached to it.
///
/// Always exactly [`BookingReference::LENGTH`] characters drawn from
/// [`BookingReference::ALPHABET`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingReference(String);

impl BookingReference {
    pub const LENGTH: usize = 8;
    pub const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Draw a reference uniformly from the alphabet. Uniqueness is the caller's job.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let token = (0..Self::LENGTH)
            .map(|_| Self::ALPHABET[rng.gen_range(0..Self::ALPHABET.len())] as char)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid booking reference '{0}': expected {len} characters from A-Z and 0-9", len = BookingReference::LENGTH)]
pub struct InvalidReference(pub String);

impl TryFrom<String> for BookingReference {
    type Error = InvalidReference;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let well_formed = value.len() == Self::LENGTH
            && value.bytes().all(|b| Self::ALPHABET.contains(&b));

        if well_formed {
            Ok(Self(value))
        } else {
            Err(InvalidReference(value))
        }
    }
}

impl FromStr for BookingReference {
    type Err = InvalidReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl From<BookingReference> for String {
    fn from(reference: BookingReference) -> Self {
        reference.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
