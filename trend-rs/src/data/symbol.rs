//! Trading pair identifiers and the static asset directory

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quote currency every pair is priced in
pub const QUOTE: &str = "USDT";

/// Base asset used when a user does not name one
pub const DEFAULT_BASE: &str = "BTC";

/// Default scan universe for best-opportunity
pub const DEFAULT_UNIVERSE: [&str; 7] = ["BTC", "ETH", "SOL", "BNB", "XRP", "ADA", "DOGE"];

/// Per-provider identifiers of a base asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker, upper case ("BTC")
    pub base: String,
    /// Human readable name, also the sentiment search term ("bitcoin")
    pub name: String,
    /// CoinGecko coin id
    pub coingecko_id: String,
    /// CoinPaprika coin id
    pub coinpaprika_id: String,
    /// False when the ids are lower-cased guesses for an unknown base
    pub known: bool,
}

// (base, name, coingecko id, coinpaprika id)
const DIRECTORY: &[(&str, &str, &str, &str)] = &[
    ("BTC", "bitcoin", "bitcoin", "btc-bitcoin"),
    ("ETH", "ethereum", "ethereum", "eth-ethereum"),
    ("SOL", "solana", "solana", "sol-solana"),
    ("BNB", "bnb", "binancecoin", "bnb-binance-coin"),
    ("XRP", "xrp", "ripple", "xrp-xrp"),
    ("ADA", "cardano", "cardano", "ada-cardano"),
    ("DOGE", "dogecoin", "dogecoin", "doge-dogecoin"),
    ("DOT", "polkadot", "polkadot", "dot-polkadot"),
    ("AVAX", "avalanche", "avalanche-2", "avax-avalanche"),
    ("LINK", "chainlink", "chainlink", "link-chainlink"),
    ("MATIC", "polygon", "matic-network", "matic-polygon"),
    ("LTC", "litecoin", "litecoin", "ltc-litecoin"),
    ("TRX", "tron", "tron", "trx-tron"),
    ("SHIB", "shiba inu", "shiba-inu", "shib-shiba-inu"),
];

impl Asset {
    /// Look up a base ticker; unknown tickers get lower-cased guess ids.
    pub fn lookup(base: &str) -> Self {
        let base = base.trim().to_uppercase();
        match DIRECTORY.iter().find(|(b, ..)| *b == base) {
            Some((b, name, gecko, paprika)) => Self {
                base: b.to_string(),
                name: name.to_string(),
                coingecko_id: gecko.to_string(),
                coinpaprika_id: paprika.to_string(),
                known: true,
            },
            None => {
                let guess = base.to_lowercase();
                Self {
                    base,
                    name: guess.clone(),
                    coingecko_id: guess.clone(),
                    coinpaprika_id: guess,
                    known: false,
                }
            }
        }
    }
}

/// A "BASE/QUOTE" pair with the quote fixed to [`QUOTE`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    base: String,
}

impl Symbol {
    /// Create a symbol for a base ticker
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().to_uppercase(),
        }
    }

    /// Parse user input such as `btc`, `BTCUSDT`, `BTC/USDT` or `btc-usdt`.
    /// Blank input resolves to the default base.
    pub fn parse(input: &str) -> Self {
        let upper = input.trim().to_uppercase();
        if upper.is_empty() {
            return Self::new(DEFAULT_BASE);
        }

        let base = upper
            .split(|c| c == '/' || c == '-' || c == '_' || c == ' ')
            .next()
            .unwrap_or(&upper);
        let base = match base.strip_suffix(QUOTE) {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => base,
        };

        Self::new(base)
    }

    /// Base ticker
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Provider identifiers for the base
    pub fn asset(&self) -> Asset {
        Asset::lookup(&self.base)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, QUOTE)
    }
}

/// Build the scan universe from a list of bases
pub fn universe<S: AsRef<str>>(bases: &[S]) -> Vec<Symbol> {
    bases
        .iter()
        .map(|b| b.as_ref().trim())
        .filter(|b| !b.is_empty())
        .map(Symbol::new)
        .collect()
}

/// Candle bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Hour,
}

impl Timeframe {
    /// Bucket length in milliseconds
    pub fn millis(&self) -> i64 {
        match self {
            Timeframe::Hour => 3_600_000,
        }
    }

    /// Short label ("1h")
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Hour => "1h",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_spellings() {
        for input in ["btc", "BTC", "BTCUSDT", "btc/usdt", "btc-usdt", " Btc "] {
            assert_eq!(Symbol::parse(input).base(), "BTC", "input {input:?}");
        }
        assert_eq!(Symbol::parse("").base(), DEFAULT_BASE);
        assert_eq!(Symbol::parse("eth").to_string(), "ETH/USDT");
    }

    #[test]
    fn test_bare_quote_is_not_stripped() {
        assert_eq!(Symbol::parse("usdt").base(), "USDT");
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let bnb = Asset::lookup("bnb");
        assert!(bnb.known);
        assert_eq!(bnb.coingecko_id, "binancecoin");
        assert_eq!(bnb.coinpaprika_id, "bnb-binance-coin");

        let pepe = Asset::lookup("PEPE");
        assert!(!pepe.known);
        assert_eq!(pepe.coingecko_id, "pepe");
        assert_eq!(pepe.coinpaprika_id, "pepe");
        assert_eq!(pepe.name, "pepe");
    }

    #[test]
    fn test_universe_skips_blanks() {
        let symbols = universe(&["btc", " ", "eth"]);
        assert_eq!(symbols, vec![Symbol::new("BTC"), Symbol::new("ETH")]);
    }
}
