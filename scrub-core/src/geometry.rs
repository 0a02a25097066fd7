//! Aspect-fit placement of a frame on a drawing surface

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where a scaled frame lands on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Uniform scale applied to the image
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scales `image` uniformly so it fits inside `surface` without cropping and
/// centers it. Returns `None` when either size is empty.
pub fn fit_contain(surface: Size, image: Size) -> Option<Placement> {
    if surface.is_empty() || image.is_empty() {
        return None;
    }

    let scale = (surface.width as f64 / image.width as f64)
        .min(surface.height as f64 / image.height as f64);
    let width = image.width as f64 * scale;
    let height = image.height as f64 * scale;

    Some(Placement {
        scale,
        x: (surface.width as f64 - width) / 2.0,
        y: (surface.height as f64 - height) / 2.0,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fits(surface: Size, image: Size) {
        let placement = fit_contain(surface, image).unwrap();
        assert!(placement.width <= surface.width as f64 + 1e-9);
        assert!(placement.height <= surface.height as f64 + 1e-9);
        let source_ratio = image.width as f64 / image.height as f64;
        let placed_ratio = placement.width / placement.height;
        assert!((source_ratio - placed_ratio).abs() < 1e-9);
        assert!(placement.x >= 0.0 && placement.y >= 0.0);
    }

    #[test]
    fn test_letterbox_wide_surface() {
        let placement = fit_contain(Size::new(1920, 1080), Size::new(1280, 1280)).unwrap();
        assert_eq!(placement.width, 1080.0);
        assert_eq!(placement.height, 1080.0);
        assert_eq!(placement.x, 420.0);
        assert_eq!(placement.y, 0.0);
    }

    #[test]
    fn test_pillarbox_tall_surface() {
        let placement = fit_contain(Size::new(390, 844), Size::new(1920, 1080)).unwrap();
        assert!((placement.scale - 390.0 / 1920.0).abs() < 1e-12);
        assert!(placement.x.abs() < 1e-9);
        assert!((placement.y - (844.0 - 1080.0 * placement.scale) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_upscales_small_images() {
        let placement = fit_contain(Size::new(800, 600), Size::new(80, 60)).unwrap();
        assert_eq!(placement.scale, 10.0);
        assert_eq!(placement.x, 0.0);
        assert_eq!(placement.y, 0.0);
    }

    #[test]
    fn test_aspect_is_preserved() {
        let surfaces = [Size::new(1920, 1080), Size::new(375, 667), Size::new(1, 1000)];
        let images = [Size::new(1920, 1080), Size::new(3, 7), Size::new(4000, 10)];
        for surface in surfaces {
            for image in images {
                assert_fits(surface, image);
            }
        }
    }

    #[test]
    fn test_empty_sizes() {
        assert!(fit_contain(Size::new(0, 1080), Size::new(10, 10)).is_none());
        assert!(fit_contain(Size::new(10, 10), Size::new(10, 0)).is_none());
    }
}
