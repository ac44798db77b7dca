//! Viewport - terminal size shared by every component of one skeleton

use std::sync::Arc;

use parking_lot::RwLock;

/// Assumed terminal size until the first resize arrives
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u16,
    pub height: u16,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Cloneable handle to the terminal size.
///
/// Written only by the skeleton on resize; readable from any thread.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    inner: Arc<RwLock<ViewportSize>>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> ViewportSize {
        *self.inner.read()
    }

    pub fn width(&self) -> u16 {
        self.inner.read().width
    }

    pub fn height(&self) -> u16 {
        self.inner.read().height
    }

    pub(crate) fn set(&self, width: u16, height: u16) {
        *self.inner.write() = ViewportSize { width, height };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_80x24() {
        let vp = Viewport::new();
        assert_eq!(vp.size(), ViewportSize { width: 80, height: 24 });
    }

    #[test]
    fn test_clones_share_size() {
        let vp = Viewport::new();
        let other = vp.clone();
        vp.set(120, 40);
        assert_eq!(other.width(), 120);
        assert_eq!(other.height(), 40);
        assert_eq!(Viewport::new().width(), 80);
    }
}
