use image::RgbImage;

/// Ordered stack of page snapshots, oldest first.
///
/// Every entry is an independent deep copy of the working raster at commit
/// time, so later in-place edits can never corrupt an earlier snapshot. Once
/// initialized the stack never drops below one entry: the post-generation
/// baseline is not undoable.
#[derive(Debug, Default)]
pub struct EditHistory {
    snapshots: Vec<RgbImage>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    /// Replace the stack with a single baseline snapshot. Used once after a
    /// page is generated.
    pub fn initialize(&mut self, page: &RgbImage) {
        self.snapshots.clear();
        self.snapshots.push(page.clone());
    }

    /// Append a deep copy of the page as the new top.
    pub fn commit(&mut self, page: &RgbImage) {
        self.snapshots.push(page.clone());
    }

    /// Drop the most recent snapshot and return the one below it, which
    /// becomes the active page. Returns `None` (and changes nothing) when
    /// only the baseline remains or the stack was never initialized.
    pub fn undo(&mut self) -> Option<&RgbImage> {
        if self.snapshots.len() > 1 {
            self.snapshots.pop();
            self.snapshots.last()
        } else {
            None
        }
    }

    /// Current top of the stack.
    pub fn top(&self) -> Option<&RgbImage> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
