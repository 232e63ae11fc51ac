//! Dashboard Rendering
//!
//! Maps a [`Snapshot`] onto a fixed set of display slots:
//!
//! - **page**: `Page` / `Element`, the in-memory element document
//! - **transactions**: transaction cards and the empty-list placeholder
//! - **html**: standalone HTML export and the file-backed `HtmlPageView`
//!
//! The renderer only talks to a [`DashboardView`], which hands out an
//! element per logical slot when it has one. A missing element is a no-op,
//! never an error.

pub mod html;
pub mod page;
pub mod transactions;

pub use html::{render_document, HtmlPageView};
pub use page::{Element, Page};
pub use transactions::{
    explorer_url, render_transaction, render_transactions, EMPTY_TRANSACTIONS_HTML,
};

use crate::format::{format_pct, format_price, format_progress, format_usd, width_style};
use crate::snapshot::Snapshot;

/// Logical display slots and their element ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Price,
    Volume,
    Buybacks,
    Burned,
    MarketCap,
    GoalLabel,
    GoalPercent,
    GoalFill,
    BurnPercent,
    BurnFill,
    ContractAddress,
    Transactions,
}

impl Slot {
    pub const ALL: [Slot; 12] = [
        Slot::Price,
        Slot::Volume,
        Slot::Buybacks,
        Slot::Burned,
        Slot::MarketCap,
        Slot::GoalLabel,
        Slot::GoalPercent,
        Slot::GoalFill,
        Slot::BurnPercent,
        Slot::BurnFill,
        Slot::ContractAddress,
        Slot::Transactions,
    ];

    /// Element id on the dashboard page
    pub fn element_id(&self) -> &'static str {
        match self {
            Slot::Price => "price",
            Slot::Volume => "volume",
            Slot::Buybacks => "buybacks",
            Slot::Burned => "burned",
            Slot::MarketCap => "market-cap",
            Slot::GoalLabel => "goal-label",
            Slot::GoalPercent => "goal-percent",
            Slot::GoalFill => "goal-fill",
            Slot::BurnPercent => "burn-percent",
            Slot::BurnFill => "burn-fill",
            Slot::ContractAddress => "contract-address",
            Slot::Transactions => "tx-list",
        }
    }
}

/// Target the dashboard renders into
pub trait DashboardView {
    /// Element for a slot, or `None` if this view does not have it
    fn element(&mut self, slot: Slot) -> Option<&mut Element>;

    /// Called once after every full render
    fn commit(&mut self) {}
}

/// Text shown when the snapshot has no contract address
pub const MISSING_ADDRESS: &str = "—";

/// Render a snapshot into every slot the view has
pub fn render_dashboard<V: DashboardView + ?Sized>(snapshot: &Snapshot, view: &mut V) {
    set_text(view, Slot::Price, || format_price(snapshot.price_usd));
    set_text(view, Slot::Volume, || format_pct(snapshot.volume_change_pct));
    set_text(view, Slot::Buybacks, || format_usd(snapshot.buybacks_usd));
    set_text(view, Slot::Burned, || format_usd(snapshot.burned_usd));
    set_text(view, Slot::MarketCap, || format_usd(snapshot.market_cap_usd));

    set_text(view, Slot::GoalLabel, || format_usd(snapshot.next_goal_usd));
    set_text(view, Slot::GoalPercent, || {
        format_progress(snapshot.next_goal_progress_pct)
    });
    if let Some(fill) = view.element(Slot::GoalFill) {
        fill.set_width(width_style(snapshot.next_goal_progress_pct));
    }

    set_text(view, Slot::BurnPercent, || format_progress(snapshot.supply_burned_pct));
    if let Some(fill) = view.element(Slot::BurnFill) {
        fill.set_width(width_style(snapshot.supply_burned_pct));
    }

    set_text(view, Slot::ContractAddress, || {
        let mint = snapshot.token_mint.trim();
        if mint.is_empty() {
            MISSING_ADDRESS.to_string()
        } else {
            mint.to_string()
        }
    });

    if let Some(list) = view.element(Slot::Transactions) {
        list.set_html(render_transactions(&snapshot.transactions));
    }

    view.commit();
}

fn set_text<V, F>(view: &mut V, slot: Slot, value: F)
where
    V: DashboardView + ?Sized,
    F: FnOnce() -> String,
{
    if let Some(element) = view.element(slot) {
        element.set_text(value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Transaction;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            price_usd: 0.000123,
            volume_change_pct: -3.25,
            buybacks_usd: 1234.5,
            burned_usd: 100.0,
            market_cap_usd: 145_000.0,
            next_goal_usd: 200_000.0,
            next_goal_progress_pct: 150.0,
            supply_burned_pct: -10.0,
            token_mint: "Mint111".to_string(),
            transactions: vec![Transaction::new("burn", 2.5)],
        }
    }

    #[test]
    fn test_render_full_page() {
        let mut page = Page::dashboard();
        render_dashboard(&sample_snapshot(), &mut page);

        assert_eq!(page.text(Slot::Price), Some("$0.00012300"));
        assert_eq!(page.text(Slot::Volume), Some("-3.3%"));
        assert_eq!(page.text(Slot::Buybacks), Some("$1,234.5"));
        assert_eq!(page.text(Slot::Burned), Some("$100"));
        assert_eq!(page.text(Slot::MarketCap), Some("$145,000"));
        assert_eq!(page.text(Slot::GoalLabel), Some("$200,000"));
        assert_eq!(page.text(Slot::GoalPercent), Some("150%"));
        assert_eq!(page.text(Slot::BurnPercent), Some("-10%"));
        assert_eq!(page.text(Slot::ContractAddress), Some("Mint111"));
        assert!(page
            .slot(Slot::Transactions)
            .unwrap()
            .html
            .contains("BURN — 2.5 SOL"));
    }

    #[test]
    fn test_bar_widths_are_clamped() {
        let mut page = Page::dashboard();
        render_dashboard(&sample_snapshot(), &mut page);

        assert_eq!(page.slot(Slot::GoalFill).unwrap().width.as_deref(), Some("100%"));
        assert_eq!(page.slot(Slot::BurnFill).unwrap().width.as_deref(), Some("0%"));
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let mut page = Page::new().element_id("price").element_id("tx-list");
        render_dashboard(&sample_snapshot(), &mut page);

        assert_eq!(page.len(), 2);
        assert_eq!(page.text(Slot::Price), Some("$0.00012300"));
        assert!(!page.slot(Slot::Transactions).unwrap().html.is_empty());
    }

    #[test]
    fn test_render_into_empty_page() {
        let mut page = Page::new();
        render_dashboard(&sample_snapshot(), &mut page);
        assert!(page.is_empty());
    }

    #[test]
    fn test_empty_transactions_render_placeholder() {
        let mut page = Page::dashboard();
        let snapshot = Snapshot {
            price_usd: 1.0,
            ..Snapshot::default()
        };
        render_dashboard(&snapshot, &mut page);

        assert_eq!(
            page.slot(Slot::Transactions).unwrap().html,
            EMPTY_TRANSACTIONS_HTML
        );
    }

    #[test]
    fn test_zero_snapshot_rendering() {
        let mut page = Page::dashboard();
        render_dashboard(&Snapshot::default(), &mut page);

        assert_eq!(page.text(Slot::Price), Some("$0.00"));
        assert_eq!(page.text(Slot::Volume), Some("+0%"));
        assert_eq!(page.text(Slot::ContractAddress), Some(MISSING_ADDRESS));
    }

    #[test]
    fn test_commit_called_once_per_render() {
        struct Counting {
            page: Page,
            commits: usize,
        }

        impl DashboardView for Counting {
            fn element(&mut self, slot: Slot) -> Option<&mut Element> {
                self.page.element(slot)
            }

            fn commit(&mut self) {
                self.commits += 1;
            }
        }

        let mut view = Counting {
            page: Page::dashboard(),
            commits: 0,
        };
        render_dashboard(&sample_snapshot(), &mut view);
        render_dashboard(&Snapshot::default(), &mut view);
        assert_eq!(view.commits, 2);
    }

    #[test]
    fn test_element_ids_are_unique() {
        let ids: std::collections::HashSet<_> = Slot::ALL.iter().map(Slot::element_id).collect();
        assert_eq!(ids.len(), Slot::ALL.len());
    }
}
