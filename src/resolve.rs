use crate::error::{ConversionError, Result};

/// Pixel dimensions of an image or a resize target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Requested target box plus the two sizing policy flags, fixed for a run.
#[derive(Debug, Clone, Copy)]
pub struct TargetSpec {
    pub width: u32,
    pub height: u32,
    pub keep_aspect_ratio: bool,
    pub no_upscale: bool,
}

impl TargetSpec {
    pub fn new(width: u32, height: u32, keep_aspect_ratio: bool, no_upscale: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidTargetSize(width, height));
        }
        Ok(Self {
            width,
            height,
            keep_aspect_ratio,
            no_upscale,
        })
    }
}

/// Compute the output dimensions for one image.
///
/// With `keep_aspect_ratio` a single uniform scale is derived from the tighter
/// axis of the target box (clamped to 1.0 under `no_upscale`), so the result
/// always fits inside the box. Without it the target is taken verbatim, except
/// that `no_upscale` clamps each axis independently to the original size --
/// which can change the aspect ratio; that is the intended fixed-box behavior.
///
/// Zero-area originals are passed through untouched and the result is never
/// smaller than 1x1.
pub fn resolve_target_size(original: Dimensions, spec: &TargetSpec) -> Dimensions {
    if original.width == 0 || original.height == 0 {
        return original;
    }

    if spec.keep_aspect_ratio {
        let scale_w = spec.width as f64 / original.width as f64;
        let scale_h = spec.height as f64 / original.height as f64;
        let mut scale = scale_w.min(scale_h);

        if spec.no_upscale {
            scale = scale.min(1.0);
        }

        let width = ((original.width as f64 * scale).round() as u32).max(1);
        let height = ((original.height as f64 * scale).round() as u32).max(1);
        return Dimensions::new(width, height);
    }

    let mut width = spec.width;
    let mut height = spec.height;

    if spec.no_upscale {
        width = width.min(original.width);
        height = height.min(original.height);
    }

    Dimensions::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(width: u32, height: u32, keep_aspect_ratio: bool, no_upscale: bool) -> TargetSpec {
        TargetSpec::new(width, height, keep_aspect_ratio, no_upscale).unwrap()
    }

    #[test]
    fn test_target_spec_rejects_zero_axis() {
        assert!(matches!(
            TargetSpec::new(0, 100, false, false),
            Err(ConversionError::InvalidTargetSize(0, 100))
        ));
        assert!(matches!(
            TargetSpec::new(100, 0, false, false),
            Err(ConversionError::InvalidTargetSize(100, 0))
        ));
    }

    #[test]
    fn test_aspect_ratio_downscale_uses_tighter_axis() {
        let resolved = resolve_target_size(Dimensions::new(800, 600), &spec(400, 400, true, false));
        assert_eq!(resolved, Dimensions::new(400, 300));
    }

    #[test]
    fn test_aspect_ratio_upscale_allowed_by_default() {
        let resolved = resolve_target_size(Dimensions::new(200, 100), &spec(400, 400, true, false));
        assert_eq!(resolved, Dimensions::new(400, 200));
    }

    #[test]
    fn test_aspect_ratio_no_upscale_keeps_smaller_original() {
        let resolved = resolve_target_size(Dimensions::new(200, 100), &spec(400, 400, true, true));
        assert_eq!(resolved, Dimensions::new(200, 100));
    }

    #[test]
    fn test_fixed_box_ignores_original() {
        let resolved = resolve_target_size(Dimensions::new(800, 600), &spec(400, 500, false, false));
        assert_eq!(resolved, Dimensions::new(400, 500));
    }

    #[test]
    fn test_fixed_box_no_upscale_clamps_axes_independently() {
        // Width shrinks to the original, height keeps the target: the aspect
        // ratio of the result matches neither input. Intended behavior.
        let resolved = resolve_target_size(Dimensions::new(300, 900), &spec(400, 500, false, true));
        assert_eq!(resolved, Dimensions::new(300, 500));
    }

    #[test]
    fn test_zero_area_original_passes_through() {
        let degenerate = Dimensions::new(0, 600);
        let resolved = resolve_target_size(degenerate, &spec(400, 400, true, true));
        assert_eq!(resolved, degenerate);
    }

    #[test]
    fn test_extreme_ratio_floors_at_one_pixel() {
        // Scale of 0.01 would round the short axis to 0; it must clamp to 1.
        let resolved = resolve_target_size(Dimensions::new(10_000, 10), &spec(100, 100, true, true));
        assert_eq!(resolved, Dimensions::new(100, 1));
    }

    #[test]
    fn test_rounding_is_nearest_integer() {
        // 350/800 = 0.4375, 600 * 0.4375 = 262.5 -> 263
        let resolved = resolve_target_size(Dimensions::new(800, 600), &spec(350, 350, true, false));
        assert_eq!(resolved, Dimensions::new(350, 263));
    }
}
