//! Snapshot and transaction types
//!
//! - `Snapshot`: one payload describing the current dashboard metrics
//! - `Transaction`: one on-chain event shown in the activity list
//! - `TxKind`: the label a transaction is rendered under

use serde::{Deserialize, Serialize};

use super::de;

/// One dashboard payload from `GET /dashboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// Token price in USD
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub price_usd: f64,
    /// 24h change, signed percentage
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub volume_change_pct: f64,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub buybacks_usd: f64,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub burned_usd: f64,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub market_cap_usd: f64,
    /// Market cap at which the next claim/buy-back/burn round triggers
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub next_goal_usd: f64,
    /// Progress towards `next_goal_usd`, expected 0-100
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub next_goal_progress_pct: f64,
    /// Share of supply burned so far, expected 0-100
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub supply_burned_pct: f64,
    /// Contract address of the token
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub token_mint: String,
    /// Most recent first, rendered in this order
    #[serde(default, deserialize_with = "de::transaction_list")]
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    /// Whether this snapshot carries real data.
    ///
    /// A backend that has not fetched market data yet answers with zero
    /// price, zero market cap and no transactions.
    pub fn is_usable(&self) -> bool {
        self.price_usd > 0.0 || self.market_cap_usd > 0.0 || !self.transactions.is_empty()
    }
}

/// `is_usable` for a possibly missing snapshot
pub fn is_usable(snapshot: Option<&Snapshot>) -> bool {
    snapshot.map(Snapshot::is_usable).unwrap_or(false)
}

/// One recorded on-chain event
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// `burn`, `buyback`, `claim` or anything else
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub amount_sol: f64,
    #[serde(
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// ISO 8601 instant
    #[serde(
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,
    /// Transaction signature; gates the explorer link
    #[serde(
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub signature: Option<String>,
    /// `confirmed` when submitted on-chain, `recorded` otherwise
    #[serde(
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
}

impl Transaction {
    /// Create a transaction of the given kind and SOL amount
    pub fn new(kind: impl Into<String>, amount_sol: f64) -> Self {
        Self {
            kind: kind.into(),
            amount_sol,
            ..Self::default()
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method: set timestamp
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Builder method: set signature
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Builder method: set status
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Display label for this transaction
    pub fn tx_kind(&self) -> TxKind {
        TxKind::from_label(&self.kind)
    }

    /// Signature, if present and non-blank
    pub fn signature_str(&self) -> Option<&str> {
        self.signature
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Display category of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Burn,
    Buyback,
    Claim,
    /// Unknown or missing label
    Other,
}

impl TxKind {
    /// Map a backend label to a kind. Matching is exact, like the backend emits it.
    pub fn from_label(label: &str) -> Self {
        match label {
            "burn" => TxKind::Burn,
            "buyback" => TxKind::Buyback,
            "claim" => TxKind::Claim,
            _ => TxKind::Other,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TxKind::Burn => "🔥",
            TxKind::Buyback => "🌀",
            TxKind::Claim => "💰",
            TxKind::Other => "ℹ️",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TxKind::Burn => "Burn transaction",
            TxKind::Buyback => "Buy-back",
            TxKind::Claim => "Claim creator fee",
            TxKind::Other => "Event",
        }
    }

    /// CSS modifier used on the transaction card
    pub fn css_class(&self) -> &'static str {
        match self {
            TxKind::Burn => "burn",
            TxKind::Buyback => "buyback",
            TxKind::Claim => "claim",
            TxKind::Other => "other",
        }
    }
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
