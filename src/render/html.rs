//! HTML export
//!
//! Writes a [`Page`] out as a standalone dashboard document. Elements the
//! page does not have are left out of the document entirely.

use std::path::{Path, PathBuf};

use super::page::{Element, Page};
use super::{DashboardView, Slot};
use crate::format::escape_html;

const STYLE: &str = r#"
body { background: #0b0d12; color: #e6e6e6; font-family: system-ui, sans-serif; margin: 0; padding: 24px; }
h1 { margin: 0 0 20px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 16px; }
.card { background: #151922; border: 1px solid #232a36; border-radius: 10px; padding: 16px; }
.label { color: #8b93a7; font-size: 13px; }
.value { font-size: 24px; font-weight: 600; margin-top: 6px; }
.bar { background: #232a36; border-radius: 6px; height: 10px; margin-top: 10px; overflow: hidden; }
.fill { background: linear-gradient(90deg, #ff7a18, #ffb347); height: 100%; }
.address { font-family: monospace; word-break: break-all; }
.tx-card { display: flex; gap: 12px; align-items: center; border-bottom: 1px solid #232a36; padding: 10px 0; }
.tx-icon { font-size: 22px; }
.tx-body { flex: 1; }
.tx-meta, .tx-time { color: #8b93a7; font-size: 12px; }
.tx-status { margin-left: 8px; font-size: 11px; color: #6fcf97; }
.tx-link { color: #ffb347; }
.tx-link.disabled { color: #555; pointer-events: none; }
.tx-empty { color: #8b93a7; }
"#;

/// Render the page as a complete HTML document
pub fn render_document(page: &Page) -> String {
    let stat = |slot: Slot, label: &str| {
        page.slot(slot)
            .map(|e| {
                format!(
                    r#"<div class="card"><div class="label">{}</div><div class="value" id="{}">{}</div></div>"#,
                    label,
                    slot.element_id(),
                    escape_html(&e.text)
                )
            })
            .unwrap_or_default()
    };

    let progress = |label_slot: Option<Slot>, percent: Slot, fill: Slot, title: &str| {
        let label = label_slot
            .and_then(|slot| text_span(page, slot))
            .map(|span| format!(" {}", span))
            .unwrap_or_default();
        let percent = text_span(page, percent).unwrap_or_default();
        let bar = page
            .slot(fill)
            .map(|e| {
                format!(
                    r#"<div class="bar"><div class="fill" id="{}" style="width: {}"></div></div>"#,
                    fill.element_id(),
                    escape_html(e.width.as_deref().unwrap_or("0%"))
                )
            })
            .unwrap_or_default();
        format!(
            r#"<div class="card"><div class="label">{}{}</div><div class="value">{}</div>{}</div>"#,
            title, label, percent, bar
        )
    };

    let address = text_span(page, Slot::ContractAddress)
        .map(|span| {
            format!(
                r#"<div class="card"><div class="label">Contract address</div><div class="address">{}</div></div>"#,
                span
            )
        })
        .unwrap_or_default();

    let transactions = page
        .slot(Slot::Transactions)
        .map(|e: &Element| {
            format!(
                r#"<div class="card"><div class="label">Recent transactions</div><div id="{}">{}</div></div>"#,
                Slot::Transactions.element_id(),
                e.html
            )
        })
        .unwrap_or_default();

    let stats = [
        stat(Slot::Price, "Price"),
        stat(Slot::Volume, "24h change"),
        stat(Slot::MarketCap, "Market cap"),
        stat(Slot::Buybacks, "Buy-backs"),
        stat(Slot::Burned, "Burned"),
    ]
    .concat();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta http-equiv="refresh" content="5">
<title>Tolkien Dashboard</title>
<style>{style}</style>
</head>
<body>
<h1>Tolkien Dashboard</h1>
<div class="grid">{stats}</div>
<div class="grid" style="margin-top: 16px">{goal}{burn}</div>
<div style="margin-top: 16px">{address}</div>
<div style="margin-top: 16px">{transactions}</div>
</body>
</html>
"#,
        style = STYLE,
        stats = stats,
        goal = progress(Some(Slot::GoalLabel), Slot::GoalPercent, Slot::GoalFill, "Next goal"),
        burn = progress(None, Slot::BurnPercent, Slot::BurnFill, "Supply burned"),
        address = address,
        transactions = transactions,
    )
}

fn text_span(page: &Page, slot: Slot) -> Option<String> {
    page.slot(slot).map(|e| {
        format!(
            r#"<span id="{}">{}</span>"#,
            slot.element_id(),
            escape_html(&e.text)
        )
    })
}

/// A [`Page`] that is written to an HTML file after every render
#[derive(Debug)]
pub struct HtmlPageView {
    page: Page,
    path: Option<PathBuf>,
}

impl HtmlPageView {
    /// View over the full dashboard page; `path` of `None` keeps it in memory only
    pub fn new(path: Option<PathBuf>) -> Self {
        Self::with_page(Page::dashboard(), path)
    }

    pub fn with_page(page: Page, path: Option<PathBuf>) -> Self {
        Self { page, path }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the current page to `path` (via a temp file and rename)
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = path.with_extension("html.tmp");
        std::fs::write(&tmp, render_document(&self.page))?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl DashboardView for HtmlPageView {
    fn element(&mut self, slot: Slot) -> Option<&mut Element> {
        self.page.element(slot)
    }

    fn commit(&mut self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };

        match self.write_to(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Dashboard page written"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to write dashboard page"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_dashboard;
    use crate::snapshot::{Snapshot, Transaction};
    use tempfile::tempdir;

    fn snapshot() -> Snapshot {
        Snapshot {
            price_usd: 0.5,
            market_cap_usd: 45_000.0,
            next_goal_usd: 100_000.0,
            next_goal_progress_pct: 45.0,
            token_mint: "<mint>".to_string(),
            transactions: vec![Transaction::new("claim", 1.0)],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_document_contains_rendered_slots() {
        let mut page = Page::dashboard();
        render_dashboard(&snapshot(), &mut page);
        let html = render_document(&page);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="price">$0.5000<"#));
        assert!(html.contains(r#"id="goal-fill" style="width: 45%""#));
        assert!(html.contains("&lt;mint&gt;"));
        assert!(html.contains("Claim creator fee"));
    }

    #[test]
    fn test_document_omits_missing_elements() {
        let mut page = Page::new().element_id("price");
        render_dashboard(&snapshot(), &mut page);
        let html = render_document(&page);

        assert!(html.contains(r#"id="price""#));
        assert!(!html.contains(r#"id="tx-list""#));
        assert!(!html.contains(r#"id="market-cap""#));
    }

    #[test]
    fn test_view_writes_file_on_commit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("dashboard.html");

        let mut view = HtmlPageView::new(Some(path.clone()));
        render_dashboard(&snapshot(), &mut view);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("$0.5000"));
        assert!(!path.with_extension("html.tmp").exists());
    }

    #[test]
    fn test_view_without_path_stays_in_memory() {
        let mut view = HtmlPageView::new(None);
        render_dashboard(&snapshot(), &mut view);
        assert_eq!(view.page().text(Slot::Price), Some("$0.5000"));
        assert!(view.path().is_none());
    }
}
