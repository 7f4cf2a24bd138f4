/// A launchable target shown on the launcher surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        id: "browser",
        label: "Skyline Browser",
        icon: "\u{1F310}",
        description: "Browse the web with a lightweight and fast browser.",
        category: "Internet",
    },
    QuickAction {
        id: "files",
        label: "Archive Explorer",
        icon: "\u{1F5C2}\u{FE0F}",
        description: "Manage documents, photos, and downloads with ease.",
        category: "Productivity",
    },
    QuickAction {
        id: "music",
        label: "Waveform Studio",
        icon: "\u{1F3A7}",
        description: "Stream playlists and manage your music library.",
        category: "Media",
    },
    QuickAction {
        id: "mail",
        label: "Mail Station",
        icon: "\u{2709}\u{FE0F}",
        description: "Check and compose messages in a focused workspace.",
        category: "Communication",
    },
];

pub fn find(id: &str) -> Option<&'static QuickAction> {
    QUICK_ACTIONS.iter().find(|action| action.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique_and_non_empty() {
        let ids: HashSet<_> = QUICK_ACTIONS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), QUICK_ACTIONS.len());
        assert!(QUICK_ACTIONS.iter().all(|a| !a.id.is_empty()));
    }

    #[test]
    fn find_looks_up_by_id() {
        assert_eq!(find("music").map(|a| a.label), Some("Waveform Studio"));
        assert!(find("terminal").is_none());
    }

    #[test]
    fn catalog_keeps_launcher_order() {
        let ids: Vec<_> = QUICK_ACTIONS.iter().map(|a| a.id).collect();
        assert_eq!(ids, ["browser", "files", "music", "mail"]);
    }
}
