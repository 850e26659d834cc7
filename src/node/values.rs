//! Validated value wrappers for node inputs and outputs.
//!
//! Every wrapper checks its format invariants at construction and serializes
//! to its primitive form, so argument structs can derive `Serialize` directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length of a token symbol.
pub const MAX_SYMBOL_LEN: usize = 8;

/// Errors raised when constructing a value wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// An identifier was empty after trimming.
    #[error("empty {0}")]
    Empty(&'static str),

    /// An identifier contained whitespace.
    #[error("invalid {kind}: {value:?}")]
    Malformed { kind: &'static str, value: String },

    /// A token amount did not match `<amount>@<symbol>`.
    #[error("invalid token value format: {0:?}")]
    TokenAmount(String),
}

macro_rules! string_value {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a raw value.
            pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ValueError::Empty($kind));
                }
                if value.chars().any(char::is_whitespace) {
                    return Err(ValueError::Malformed { kind: $kind, value });
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = ValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value!(
    /// A wallet address returned by `getnewaddress`.
    Address,
    "address"
);
string_value!(
    /// A transaction id returned by state-changing node commands.
    TxHash,
    "transaction hash"
);
string_value!(
    /// Identifier of an appointed oracle.
    OracleId,
    "oracle id"
);

/// Chain tip height, used as the scheduling clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    pub fn value(self) -> u64 {
        self.0
    }

    /// The height directly after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// True when the height is an exact multiple of `interval`.
    ///
    /// A zero interval never matches.
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval != 0 && self.0 % interval == 0
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}

impl From<BlockHeight> for u64 {
    fn from(height: BlockHeight) -> Self {
        height.0
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of a token, written `<amount>@<symbol>` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenAmount {
    amount: f64,
    token: String,
}

impl TokenAmount {
    /// Build from parts, applying the same checks as parsing.
    pub fn new(amount: f64, token: impl Into<String>) -> Result<Self, ValueError> {
        let token = token.into();
        let symbol_len = token.chars().count();
        if symbol_len == 0 || symbol_len > MAX_SYMBOL_LEN || !amount.is_finite() || amount < 0.0 {
            return Err(ValueError::TokenAmount(format!("{amount}@{token}")));
        }
        Ok(Self { amount, token })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for TokenAmount {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::TokenAmount(s.to_string());

        let mut parts = s.split('@');
        let (Some(amount), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let amount: f64 = amount.trim().parse().map_err(|_| invalid())?;

        Self::new(amount, token).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenAmount> for String {
    fn from(value: TokenAmount) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.amount, self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_amount_canonical_form() {
        for (input, expected) in [
            ("3@DFI", "3@DFI"),
            ("4000@ETH", "4000@ETH"),
            ("60000.0@BTC", "60000@BTC"),
            ("1.50@TSLA", "1.5@TSLA"),
            ("0@ABCDEFGH", "0@ABCDEFGH"),
        ] {
            let amount: TokenAmount = input.parse().unwrap();
            assert_eq!(amount.to_string(), expected);
        }
    }

    #[test]
    fn test_token_amount_parts() {
        let amount: TokenAmount = "123.25@GOOGL".parse().unwrap();
        assert_eq!(amount.amount(), 123.25);
        assert_eq!(amount.token(), "GOOGL");
    }

    #[test]
    fn test_token_amount_rejects_bad_separator() {
        for input in ["3DFI", "3@DFI@X", "", "@"] {
            assert!(input.parse::<TokenAmount>().is_err(), "{input} should fail");
        }
    }

    #[test]
    fn test_token_amount_rejects_symbol_length() {
        assert!("3@".parse::<TokenAmount>().is_err());
        assert!("3@ABCDEFGHI".parse::<TokenAmount>().is_err());
    }

    #[test]
    fn test_token_amount_rejects_bad_amount() {
        for input in ["-1@DFI", "inf@DFI", "NaN@DFI", "null@GOOGL", "abc@DFI", "@DFI"] {
            assert!(input.parse::<TokenAmount>().is_err(), "{input} should fail");
        }
    }

    #[test]
    fn test_token_amount_serde() {
        let amount: TokenAmount = "3@DFI".parse().unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"3@DFI\"");

        let decoded: Vec<TokenAmount> = serde_json::from_str(r#"["1.5@BTC", "10@DFI"]"#).unwrap();
        assert_eq!(decoded[1].token(), "DFI");
        assert!(serde_json::from_str::<TokenAmount>("\"bad\"").is_err());
    }

    #[test]
    fn test_string_values() {
        let address = Address::new("tf1qxyz").unwrap();
        assert_eq!(serde_json::to_string(&address).unwrap(), "\"tf1qxyz\"");
        assert_eq!(Address::new(""), Err(ValueError::Empty("address")));
        assert!(OracleId::new("ab cd").is_err());
        assert!("abc123".parse::<TxHash>().is_ok());
    }

    #[test]
    fn test_block_height() {
        let height = BlockHeight::from(119u64);
        assert_eq!(height.next(), BlockHeight(120));
        assert!(height.next().is_multiple_of(20));
        assert!(!height.is_multiple_of(20));
        assert!(!height.is_multiple_of(0));
        assert!(BlockHeight(5) < BlockHeight(6));
    }
}
