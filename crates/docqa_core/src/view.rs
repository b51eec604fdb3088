/// The four top-level views. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Chat,
    Upload,
    Dashboard,
    Documents,
}

impl View {
    /// Navigation order, as shown in the tab bar.
    pub const ALL: [View; 4] = [View::Chat, View::Upload, View::Dashboard, View::Documents];

    pub fn index(self) -> usize {
        match self {
            View::Chat => 0,
            View::Upload => 1,
            View::Dashboard => 2,
            View::Documents => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Chat => "Chat",
            View::Upload => "Upload Documents",
            View::Dashboard => "Dashboard",
            View::Documents => "Documents",
        }
    }
}
