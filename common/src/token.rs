// SPDX-License-Identifier: AGPL-3.0-or-later

//! Auth tokens: opaque, 32 lowercase hex characters, drawn from two 64-bit
//! values sampled from a cryptographically unpredictable source. Never
//! derived from a seeded PRNG — a fresh `OsRng` draw per join.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Token(pub u64, pub u64);

impl Token {
    #[cfg(feature = "server")]
    pub fn generate() -> Self {
        use rand::rngs::OsRng;
        use rand::RngCore;
        let mut rng = OsRng;
        Self(rng.next_u64(), rng.next_u64())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.0, self.1)
    }
}

impl std::str::FromStr for Token {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(());
        }
        let hi = u64::from_str_radix(&s[..16], 16).map_err(|_| ())?;
        let lo = u64::from_str_radix(&s[16..], 16).map_err(|_| ())?;
        Ok(Self(hi, lo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_from_str() {
        let token = Token(0x1234_5678_9abc_def0, 0x0fed_cba9_8765_4321);
        let text = token.to_string();
        assert_eq!(text.len(), 32);
        assert_eq!(text.parse::<Token>().unwrap(), token);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!("too-short".parse::<Token>().is_err());
        assert!("zz".repeat(16).parse::<Token>().is_err());
    }

    #[cfg(feature = "server")]
    #[test]
    fn generated_tokens_are_distinct() {
        let a = Token::generate();
        let b = Token::generate();
        assert_ne!(a, b);
    }
}
