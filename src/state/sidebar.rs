//! Collapsible sidebar with grouped submenus.

use super::View;

/// Sidebar group holding related views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MenuGroup {
    Organization,
    Purchasing,
    Help,
}

impl MenuGroup {
    pub const ALL: [MenuGroup; 3] = [MenuGroup::Organization, MenuGroup::Purchasing, MenuGroup::Help];

    pub fn title(&self) -> &'static str {
        match self {
            MenuGroup::Organization => "Organization",
            MenuGroup::Purchasing => "Purchasing",
            MenuGroup::Help => "Help",
        }
    }

    pub fn views(&self) -> &'static [View] {
        match self {
            MenuGroup::Organization => &[View::Departments, View::Assignments],
            MenuGroup::Purchasing => &[View::PurchaseQuotes],
            MenuGroup::Help => &[View::Faqs],
        }
    }

    fn index(&self) -> usize {
        match self {
            MenuGroup::Organization => 0,
            MenuGroup::Purchasing => 1,
            MenuGroup::Help => 2,
        }
    }
}

/// Line of the sidebar.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SidebarEntry {
    Group(MenuGroup),
    Item(View),
}

/// Sidebar visibility, expanded groups and cursor.
///
#[derive(Debug, Clone)]
pub struct Sidebar {
    open: bool,
    expanded: [bool; 3],
    cursor: usize,
}

impl Default for Sidebar {
    fn default() -> Self {
        Sidebar {
            open: true,
            expanded: [true, false, false],
            cursor: 1,
        }
    }
}

impl Sidebar {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_open(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_expanded(&self, group: MenuGroup) -> bool {
        self.expanded[group.index()]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Lines currently shown: every group, followed by its views when the
    /// group is expanded.
    ///
    pub fn entries(&self) -> Vec<SidebarEntry> {
        let mut entries = vec![];
        for group in MenuGroup::ALL {
            entries.push(SidebarEntry::Group(group));
            if self.is_expanded(group) {
                entries.extend(group.views().iter().map(|v| SidebarEntry::Item(*v)));
            }
        }
        entries
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.entries().len() {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Activate the line under the cursor: groups fold or unfold, items
    /// return the view to show.
    ///
    pub fn activate(&mut self) -> Option<View> {
        match self.entries().get(self.cursor).copied()? {
            SidebarEntry::Group(group) => {
                let index = group.index();
                self.expanded[index] = !self.expanded[index];
                None
            }
            SidebarEntry::Item(view) => Some(view),
        }
    }
}
