use ratatui::layout::Rect;

/// Mouse click regions for UI interaction
#[derive(Debug, Default)]
pub struct ClickRegions {
    /// Clickable rows for each quick action (catalog index, bounding rect)
    pub action_regions: Vec<(usize, Rect)>,
}

impl ClickRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog index of the action row under the given cell
    pub fn action_at(&self, column: u16, row: u16) -> Option<usize> {
        self.action_regions
            .iter()
            .find(|(_, rect)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(index, _)| *index)
    }
}
