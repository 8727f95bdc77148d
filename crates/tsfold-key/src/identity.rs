//! Group identity of a record.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use tsfold_types::{Result, TsfoldError};

/// Separator placed between the rendered identity components.
const SEPARATOR: char = '-';

/// The exchange, symbol and period bucket that decide which records are
/// reduced together.
///
/// Equality, ordering and hashing all use the rendered form
/// (`EXCHANGE-SYMBOL-PERIOD`, with empty components left out), so two
/// identities compare equal exactly when they render the same.
#[derive(Debug, Clone)]
pub struct GroupIdentity {
    exchange: String,
    symbol: String,
    period: String,
    rendered: String,
}

impl GroupIdentity {
    /// Creates a group identity.
    ///
    /// # Errors
    ///
    /// Returns [`TsfoldError::EmptyPeriodBucket`] if `period` is empty.
    pub fn new(
        exchange: impl Into<String>,
        symbol: impl Into<String>,
        period: impl Into<String>,
    ) -> Result<Self> {
        let exchange = exchange.into();
        let symbol = symbol.into();
        let period = period.into();
        if period.is_empty() {
            return Err(TsfoldError::EmptyPeriodBucket);
        }

        let mut rendered = String::with_capacity(exchange.len() + symbol.len() + period.len() + 2);
        for part in [&exchange, &symbol] {
            if !part.is_empty() {
                rendered.push_str(part);
                rendered.push(SEPARATOR);
            }
        }
        rendered.push_str(&period);

        Ok(Self {
            exchange,
            symbol,
            period,
            rendered,
        })
    }

    /// Exchange tag, possibly empty.
    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    /// Symbol tag, possibly empty.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Period bucket label, never empty.
    #[must_use]
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Exchange and symbol joined by the separator, skipping empty parts.
    #[must_use]
    pub fn header(&self) -> String {
        match (self.exchange.is_empty(), self.symbol.is_empty()) {
            (true, _) => self.symbol.clone(),
            (false, true) => self.exchange.clone(),
            (false, false) => format!("{}{SEPARATOR}{}", self.exchange, self.symbol),
        }
    }

    /// The rendered identity.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl std::fmt::Display for GroupIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl PartialEq for GroupIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for GroupIdentity {}

impl PartialOrd for GroupIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered.cmp(&other.rendered)
    }
}

impl Hash for GroupIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendered.hash(state);
    }
}
