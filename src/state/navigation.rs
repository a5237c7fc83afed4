//! Navigation-related state types.
//!
//! This module contains enums related to views and focus.

/// Specifying the different foci.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    Sidebar,
    View,
}

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum View {
    Departments,
    Faqs,
    PurchaseQuotes,
    Assignments,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Departments => "Departments",
            View::Faqs => "FAQs",
            View::PurchaseQuotes => "Purchase Quotes",
            View::Assignments => "Assignments",
        }
    }
}

/// Part of a list view receiving keys.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ListFocus {
    Rows,
    Filter,
    Pager,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus() {
        assert_ne!(Focus::Sidebar, Focus::View);
    }

    #[test]
    fn test_view_titles_are_distinct() {
        let titles = [
            View::Departments.title(),
            View::Faqs.title(),
            View::PurchaseQuotes.title(),
            View::Assignments.title(),
        ];
        for (i, a) in titles.iter().enumerate() {
            for b in &titles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
