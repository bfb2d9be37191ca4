//! Backing pixel buffer for the board.
//!
//! The surface has two sizes: the layout (display) rectangle it occupies on
//! screen, and the backing buffer it actually paints into. They differ by the
//! device pixel ratio (or whatever backing size the host picks). Pointer
//! positions arrive in display coordinates and are mapped into backing pixels
//! with [`Surface::to_surface_point`].

use crate::export::ExportError;
use log::{debug, trace, warn};

/// On-screen rectangle occupied by the surface, in display (CSS/layout) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Cairo image buffer plus the geometry needed to address it.
///
/// The buffer is absent until the first non-empty resize and after
/// [`Surface::detach`]; every paint against an absent buffer is a no-op.
pub struct Surface {
    image: Option<cairo::ImageSurface>,
    layout: DisplayRect,
    device_pixel_ratio: f64,
    backing_width: i32,
    backing_height: i32,
}

impl Surface {
    /// Creates a surface with no backing buffer yet.
    pub fn new(device_pixel_ratio: f64) -> Self {
        let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            warn!("Invalid device pixel ratio {device_pixel_ratio}, using 1.0");
            1.0
        };
        Self {
            image: None,
            layout: DisplayRect::sized(0.0, 0.0),
            device_pixel_ratio,
            backing_width: 0,
            backing_height: 0,
        }
    }

    /// Creates a surface and allocates its buffer for `layout`.
    pub fn with_layout(layout: DisplayRect, device_pixel_ratio: f64) -> Self {
        let mut surface = Self::new(device_pixel_ratio);
        surface.resize(layout);
        surface
    }

    /// Resizes to `layout`, scaling the backing buffer by the device pixel ratio.
    ///
    /// Returns `true` when the buffer was reallocated (its pixels are gone).
    pub fn resize(&mut self, layout: DisplayRect) -> bool {
        let width = backing_dimension(layout.width, self.device_pixel_ratio);
        let height = backing_dimension(layout.height, self.device_pixel_ratio);
        self.resize_backing(layout, width, height)
    }

    /// Resizes to `layout` with an explicit backing buffer size.
    ///
    /// Returns `true` when the buffer was reallocated (its pixels are gone).
    pub fn resize_backing(&mut self, layout: DisplayRect, width: i32, height: i32) -> bool {
        self.layout = layout;

        let unchanged = self.image.is_some()
            && self.backing_width == width
            && self.backing_height == height;
        if unchanged {
            trace!("Surface size unchanged at {width}x{height}");
            return false;
        }

        self.backing_width = width.max(0);
        self.backing_height = height.max(0);
        self.image = None;

        if width <= 0 || height <= 0 {
            debug!("Surface collapsed to {width}x{height}; painting disabled");
            return true;
        }

        match cairo::ImageSurface::create(cairo::Format::ARgb32, width, height) {
            Ok(image) => {
                debug!(
                    "Allocated {width}x{height} backing buffer for {}x{} layout",
                    layout.width, layout.height
                );
                self.image = Some(image);
            }
            Err(err) => {
                warn!("Failed to allocate {width}x{height} surface: {err}");
            }
        }
        true
    }

    /// Drops the backing buffer (teardown). Later paints become no-ops.
    pub fn detach(&mut self) {
        if self.image.take().is_some() {
            debug!("Surface detached");
        }
    }

    pub fn is_available(&self) -> bool {
        self.image.is_some()
    }

    pub fn layout(&self) -> DisplayRect {
        self.layout
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Backing buffer size in pixels.
    pub fn backing_size(&self) -> (i32, i32) {
        (self.backing_width, self.backing_height)
    }

    /// Maps a display-space pointer position into backing-buffer pixels.
    ///
    /// `x' = (client_x - left) * W / Wd`, `y' = (client_y - top) * H / Hd`.
    pub fn to_surface_point(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        let scale_x = axis_scale(self.backing_width, self.layout.width, self.device_pixel_ratio);
        let scale_y = axis_scale(self.backing_height, self.layout.height, self.device_pixel_ratio);
        (
            (client_x - self.layout.left) * scale_x,
            (client_y - self.layout.top) * scale_y,
        )
    }

    /// Runs `paint` against a fresh Cairo context for the buffer.
    ///
    /// Returns `false` without calling `paint` when no buffer is available.
    pub fn with_context<F>(&self, paint: F) -> bool
    where
        F: FnOnce(&cairo::Context),
    {
        let Some(image) = &self.image else {
            trace!("Surface unavailable; skipping paint");
            return false;
        };

        match cairo::Context::new(image) {
            Ok(ctx) => {
                paint(&ctx);
                true
            }
            Err(err) => {
                warn!("Failed to create drawing context: {err}");
                false
            }
        }
    }

    /// Encodes the current pixels as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let image = self.image.as_ref().ok_or(ExportError::SurfaceUnavailable)?;
        image.flush();
        let mut png = Vec::new();
        image.write_to_png(&mut png)?;
        Ok(png)
    }

    /// Copies the raw ARGB32 buffer (premultiplied, native endian).
    pub fn snapshot(&mut self) -> Option<Vec<u8>> {
        let image = self.image.as_mut()?;
        image.flush();
        image.data().ok().map(|data| data.to_vec())
    }

    /// Reads one pixel as a native ARGB32 word (`0xAARRGGBB`, premultiplied).
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.backing_width || y >= self.backing_height {
            return None;
        }
        let image = self.image.as_mut()?;
        image.flush();
        let stride = image.stride() as usize;
        let data = image.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
        Some(u32::from_ne_bytes(bytes))
    }
}

fn backing_dimension(display: f64, device_pixel_ratio: f64) -> i32 {
    if !(display.is_finite() && display > 0.0) {
        return 0;
    }
    ((display * device_pixel_ratio).round() as i32).max(1)
}

fn axis_scale(backing: i32, display: f64, device_pixel_ratio: f64) -> f64 {
    if backing > 0 && display > 0.0 {
        backing as f64 / display
    } else {
        device_pixel_ratio
    }
}
