//! In-memory filter/search/pagination over the merchant collection.
//!
//! Pure and synchronous: the view operates on already-validated records and
//! is recomputed whenever an input changes. Filters apply in a fixed order
//! (assignment -> category -> sub-category -> search) so the derived
//! category option lists stay consistent with what is shown.

// Allow dead code: pagination and option-list methods are driven by the UI
#![allow(dead_code)]

use serde::Deserialize;

use crate::models::Merchant;

/// Merchants shown per "load more" step.
pub const PAGE_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentFilter {
    #[default]
    All,
    Assigned,
    Unassigned,
}

impl AssignmentFilter {
    fn matches(&self, merchant: &Merchant) -> bool {
        match self {
            AssignmentFilter::All => true,
            AssignmentFilter::Assigned => merchant.is_assigned(),
            AssignmentFilter::Unassigned => !merchant.is_assigned(),
        }
    }
}

/// User-supplied view criteria plus the visible pagination window.
///
/// `None` for category/sub-category means "all". Mutating any criterion
/// resets the window back to one page; `load_more` extends it.
#[derive(Debug, Clone, Default)]
pub struct MerchantQuery {
    search: String,
    assignment: AssignmentFilter,
    category: Option<String>,
    sub_category: Option<String>,
    extra_pages: usize,
}

impl MerchantQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.extra_pages = 0;
    }

    pub fn set_assignment(&mut self, filter: AssignmentFilter) {
        self.assignment = filter;
        self.extra_pages = 0;
    }

    /// Changing the category resets the sub-category, which may no longer
    /// exist under the new selection.
    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
        self.sub_category = None;
        self.extra_pages = 0;
    }

    pub fn set_sub_category(&mut self, sub_category: Option<String>) {
        self.sub_category = sub_category;
        self.extra_pages = 0;
    }

    pub fn load_more(&mut self) {
        self.extra_pages += 1;
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.sub_category.as_deref()
    }

    /// Apply all criteria, in order, over the full collection.
    pub fn filter<'a>(&self, merchants: &'a [Merchant]) -> Vec<&'a Merchant> {
        let term = self.search.trim().to_lowercase();

        merchants
            .iter()
            .filter(|m| self.assignment.matches(m))
            .filter(|m| match &self.category {
                Some(category) => m.category == *category,
                None => true,
            })
            .filter(|m| match &self.sub_category {
                Some(sub) => m.sub_category == *sub,
                None => true,
            })
            .filter(|m| matches_search(m, &term))
            .collect()
    }

    /// The filtered collection truncated to the visible window.
    pub fn visible<'a>(&self, merchants: &'a [Merchant]) -> Vec<&'a Merchant> {
        let mut filtered = self.filter(merchants);
        filtered.truncate(PAGE_SIZE * (self.extra_pages + 1));
        filtered
    }

    /// Distinct non-empty categories across the full collection, in
    /// first-seen order. Derived, not configured.
    pub fn categories(merchants: &[Merchant]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for m in merchants {
            let category = m.category.trim();
            if !category.is_empty() && !out.iter().any(|c| c == category) {
                out.push(category.to_string());
            }
        }
        out
    }

    /// Distinct non-empty sub-categories, restricted to the currently
    /// selected category when one is set.
    pub fn sub_categories(&self, merchants: &[Merchant]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for m in merchants {
            if let Some(category) = &self.category {
                if m.category != *category {
                    continue;
                }
            }
            let sub = m.sub_category.trim();
            if !sub.is_empty() && !out.iter().any(|c| c == sub) {
                out.push(sub.to_string());
            }
        }
        out
    }
}

/// Case-insensitive substring match against the searchable fields. An empty
/// term matches everything.
fn matches_search(merchant: &Merchant, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    [
        &merchant.business_name,
        &merchant.category,
        &merchant.sub_category,
        &merchant.address,
        &merchant.contact_person,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
}
