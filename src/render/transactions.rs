//! Transaction list rendering
//!
//! Each transaction becomes one card: icon and title by kind, a meta line
//! (`BURN — 2.5 SOL`), description, timestamp and an explorer link.

use crate::format::{escape_html, format_sol, format_timestamp};
use crate::snapshot::Transaction;

/// Explorer base for transaction links
pub const EXPLORER_TX_BASE: &str = "https://solscan.io/tx/";

/// Rendered list content when there are no transactions
pub const EMPTY_TRANSACTIONS_HTML: &str =
    r#"<div class="tx-empty">No recent transactions.</div>"#;

/// Explorer URL for a transaction signature
pub fn explorer_url(signature: &str) -> String {
    format!("{}{}", EXPLORER_TX_BASE, urlencoding::encode(signature))
}

/// Meta line: uppercased kind and SOL amount
pub fn meta_line(tx: &Transaction) -> String {
    format!("{} — {}", tx.kind.to_uppercase(), format_sol(tx.amount_sol))
}

/// Render the whole list, in sequence order
pub fn render_transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return EMPTY_TRANSACTIONS_HTML.to_string();
    }

    transactions
        .iter()
        .map(render_transaction)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single transaction card
pub fn render_transaction(tx: &Transaction) -> String {
    let kind = tx.tx_kind();
    let description = tx.description.as_deref().unwrap_or_default();
    let time = format_timestamp(tx.timestamp.as_deref());

    let status = tx
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!(r#"<span class="tx-status">{}</span>"#, escape_html(s)))
        .unwrap_or_default();

    // Without a signature there is nothing to open, so no new-tab attributes
    let link = match tx.signature_str() {
        Some(sig) => format!(
            r#"<a class="tx-link" href="{}" target="_blank" rel="noopener noreferrer">View on Solscan</a>"#,
            escape_html(&explorer_url(sig))
        ),
        None => r##"<a class="tx-link disabled" href="#" aria-disabled="true">No signature</a>"##
            .to_string(),
    };

    format!(
        concat!(
            r#"<div class="tx-card tx-{css}">"#,
            r#"<div class="tx-icon">{icon}</div>"#,
            r#"<div class="tx-body">"#,
            r#"<div class="tx-title">{title}{status}</div>"#,
            r#"<div class="tx-meta">{meta}</div>"#,
            r#"<div class="tx-desc">{description}</div>"#,
            r#"<div class="tx-time">{time}</div>"#,
            r#"</div>"#,
            "{link}",
            r#"</div>"#
        ),
        css = kind.css_class(),
        icon = kind.icon(),
        title = kind.title(),
        status = status,
        meta = escape_html(&meta_line(tx)),
        description = escape_html(description),
        time = escape_html(&time),
        link = link,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_card_without_signature() {
        let tx = Transaction::new("burn", 2.5);
        let html = render_transaction(&tx);

        assert!(html.contains("🔥"));
        assert!(html.contains(r#"<div class="tx-title">Burn transaction</div>"#));
        assert!(html.contains(r#"<div class="tx-meta">BURN — 2.5 SOL</div>"#));
        assert!(html.contains(r#"<div class="tx-time"></div>"#));
        assert!(html.contains("tx-link disabled"));
        assert!(!html.contains("target="));
        assert!(!html.contains("solscan.io"));
    }

    #[test]
    fn test_card_with_signature_links_to_explorer() {
        let tx = Transaction::new("buyback", 0.25)
            .signature("5abcDEF")
            .description("Executed buy-back of 0.25 SOL")
            .status("confirmed");
        let html = render_transaction(&tx);

        assert!(html.contains("🌀"));
        assert!(html.contains("Buy-back"));
        assert!(html.contains("BUYBACK — 0.25 SOL"));
        assert!(html.contains(r#"href="https://solscan.io/tx/5abcDEF""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("Executed buy-back of 0.25 SOL"));
        assert!(html.contains(r#"<span class="tx-status">confirmed</span>"#));
    }

    #[test]
    fn test_card_titles_by_kind() {
        let claim = render_transaction(&Transaction::new("claim", 1.0));
        assert!(claim.contains("💰"));
        assert!(claim.contains("Claim creator fee"));

        let other = render_transaction(&Transaction::new("airdrop", 1.0));
        assert!(other.contains("ℹ️"));
        assert!(other.contains(r#"<div class="tx-title">Event</div>"#));
        assert!(other.contains("AIRDROP — 1 SOL"));
    }

    #[test]
    fn test_card_escapes_backend_text() {
        let tx = Transaction::new("claim", 0.0).description("Claim failed: <timeout>");
        let html = render_transaction(&tx);
        assert!(html.contains("Claim failed: &lt;timeout&gt;"));
        assert!(!html.contains("<timeout>"));
    }

    #[test]
    fn test_empty_list_placeholder() {
        assert_eq!(render_transactions(&[]), EMPTY_TRANSACTIONS_HTML);
        assert!(EMPTY_TRANSACTIONS_HTML.contains("No recent transactions."));
    }

    #[test]
    fn test_list_keeps_sequence_order() {
        let txs = vec![
            Transaction::new("burn", 1.0),
            Transaction::new("buyback", 1.0),
            Transaction::new("claim", 1.0),
        ];
        let html = render_transactions(&txs);

        let burn = html.find("tx-burn").unwrap();
        let buyback = html.find("tx-buyback").unwrap();
        let claim = html.find("tx-claim").unwrap();
        assert!(burn < buyback && buyback < claim);
    }

    #[test]
    fn test_explorer_url() {
        assert_eq!(explorer_url("abc123"), "https://solscan.io/tx/abc123");
        assert_eq!(explorer_url("a/b"), "https://solscan.io/tx/a%2Fb");
    }
}
