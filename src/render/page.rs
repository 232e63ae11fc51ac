//! In-memory dashboard page
//!
//! A flat set of elements addressed by id. Slots whose element is absent
//! are skipped by the renderer, so partial pages are fine.

use std::collections::BTreeMap;

use super::{DashboardView, Slot};

/// One addressable element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Text content (escaped on export)
    pub text: String,
    /// Raw inner HTML
    pub html: String,
    /// CSS width, e.g. `"45%"`
    pub width: Option<String>,
}

impl Element {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    pub fn set_width(&mut self, width: impl Into<String>) {
        self.width = Some(width.into());
    }
}

/// Elements keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    elements: BTreeMap<String, Element>,
}

impl Page {
    /// Page with no elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with an element for every dashboard slot
    pub fn dashboard() -> Self {
        Self::with_elements(Slot::ALL.iter().map(Slot::element_id))
    }

    /// Page with the given element ids
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: ids
                .into_iter()
                .map(|id| (id.into(), Element::default()))
                .collect(),
        }
    }

    /// Builder method: add an empty element
    pub fn element_id(mut self, id: impl Into<String>) -> Self {
        self.elements.entry(id.into()).or_default();
        self
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Element backing a slot, if the page has it
    pub fn slot(&self, slot: Slot) -> Option<&Element> {
        self.get(slot.element_id())
    }

    /// Text of a slot, if the page has it
    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.slot(slot).map(|e| e.text.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl DashboardView for Page {
    fn element(&mut self, slot: Slot) -> Option<&mut Element> {
        self.get_mut(slot.element_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_page_has_every_slot() {
        let page = Page::dashboard();
        assert_eq!(page.len(), Slot::ALL.len());
        for slot in Slot::ALL {
            assert!(page.contains(slot.element_id()));
        }
    }

    #[test]
    fn test_partial_page() {
        let mut page = Page::new().element_id("price");
        assert!(page.element(Slot::Price).is_some());
        assert!(page.element(Slot::Volume).is_none());
        assert_eq!(page.text(Slot::Volume), None);
    }
}
