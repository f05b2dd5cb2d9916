use glam::Vec2;

/// Placement of the viewport inside the host window, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect filling a whole window
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Pixel position to normalized device coordinates, y up
    pub fn to_ndc(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }
        Some(Vec2::new(
            (x - self.left) / self.width * 2.0 - 1.0,
            -((y - self.top) / self.height) * 2.0 + 1.0,
        ))
    }
}

/// Proof that the viewport was mounted at some point; stale once the
/// viewport is unmounted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountToken {
    epoch: u64,
}

/// Mount point the renderer output attaches to
#[derive(Debug, Default)]
pub struct Viewport {
    rect: Option<ViewportRect>,
    epoch: u64,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, rect: ViewportRect) {
        log::debug!("Viewport mounted at {:?}", rect);
        self.rect = Some(rect);
    }

    pub fn unmount(&mut self) {
        if self.rect.take().is_some() {
            self.epoch += 1;
            log::debug!("Viewport unmounted (epoch {})", self.epoch);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.rect.is_some()
    }

    pub fn rect(&self) -> Option<ViewportRect> {
        self.rect
    }

    /// Returns the new size when mounted
    pub fn resize(&mut self, width: u32, height: u32) -> Option<(f32, f32)> {
        let rect = self.rect.as_mut()?;
        rect.width = width as f32;
        rect.height = height as f32;
        Some((rect.width, rect.height))
    }

    pub fn to_ndc(&self, x: f32, y: f32) -> Option<Vec2> {
        self.rect?.to_ndc(x, y)
    }

    pub fn mount_token(&self) -> Option<MountToken> {
        self.rect.map(|_| MountToken { epoch: self.epoch })
    }

    /// Still mounted, and never unmounted since the token was taken
    pub fn is_current(&self, token: MountToken) -> bool {
        self.is_mounted() && self.epoch == token.epoch
    }
}
