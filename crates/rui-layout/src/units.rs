//! Length units and their resolution to pixels.

use crate::geometry::{BoxBorderWidth, LayoutScalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Affected by the global magnification factor.
    Pixels,
    /// Not affected by magnification.
    UnmagnifiedPixels,
    Inches,
    Cm,
    Mm,
    /// 1/72 of an inch.
    Point,
    /// 12 points.
    Pica,
    /// One character cell — the size of an average character, including
    /// ascent and descent. Unlike the other units this has a different
    /// interpretation per axis.
    Chars,
    /// One em — the current font size.
    Em,
    /// One ex — the height of the character 'x' in the current font.
    Ex,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteLength {
    pub length: f32,
    pub units: LengthUnit,
}

impl AbsoluteLength {
    pub fn new(length: f32, units: LengthUnit) -> Self {
        Self { length, units }
    }

    pub fn pixels(length: f32) -> Self {
        Self::new(length, LengthUnit::Pixels)
    }
}

impl Default for AbsoluteLength {
    fn default() -> Self {
        Self::pixels(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbsoluteSize {
    pub width: AbsoluteLength,
    pub height: AbsoluteLength,
}

impl AbsoluteSize {
    pub fn new(width: AbsoluteLength, height: AbsoluteLength) -> Self {
        Self { width, height }
    }

    fn axis(&self, axis: usize) -> AbsoluteLength {
        if axis == 0 { self.width } else { self.height }
    }
}

/// Either a fraction of the containing element's full length, or an
/// absolute length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeLength {
    pub is_relative: bool,
    pub length: f32,
    pub units: LengthUnit,
}

impl RelativeLength {
    pub fn relative(fraction: f32) -> Self {
        Self { is_relative: true, length: fraction, units: LengthUnit::Pixels }
    }

    pub fn absolute(length: f32, units: LengthUnit) -> Self {
        Self { is_relative: false, length, units }
    }
}

/// Font/device metrics needed to resolve a length expressed in font- or
/// device-relative units into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleInfo {
    /// Global UI magnification factor (applies to `Pixels` but not
    /// `UnmagnifiedPixels`).
    pub magnification: f32,
    /// Size of an average character cell, per axis.
    pub character_size: [f32; 2],
    pub font_size: f32,
    pub x_height: f32,
    pub padding_size: LayoutScalar,
}

impl Default for StyleInfo {
    fn default() -> Self {
        Self {
            magnification: 1.0,
            character_size: [8.0, 16.0],
            font_size: 13.0,
            x_height: 7.0,
            padding_size: 4,
        }
    }
}

/// Pixels-per-inch, per axis.
pub type Ppi = [f32; 2];

pub fn resolve_absolute_length(
    ppi: Ppi,
    style_info: &StyleInfo,
    axis: usize,
    length: AbsoluteLength,
) -> f32 {
    let scale_factor = match length.units {
        LengthUnit::Pixels => style_info.magnification,
        LengthUnit::UnmagnifiedPixels => 1.0,
        LengthUnit::Inches => style_info.magnification * ppi[axis],
        LengthUnit::Cm => style_info.magnification * ppi[axis] / 2.54,
        LengthUnit::Mm => style_info.magnification * ppi[axis] / 25.4,
        LengthUnit::Point => style_info.magnification * ppi[axis] / 72.0,
        LengthUnit::Pica => style_info.magnification * ppi[axis] / 6.0,
        LengthUnit::Chars => style_info.character_size[axis],
        LengthUnit::Em => style_info.font_size,
        LengthUnit::Ex => style_info.x_height,
    };
    length.length * scale_factor
}

pub fn resolve_absolute_size(ppi: Ppi, style_info: &StyleInfo, size: AbsoluteSize) -> (f32, f32) {
    (
        resolve_absolute_length(ppi, style_info, 0, size.axis(0)),
        resolve_absolute_length(ppi, style_info, 1, size.axis(1)),
    )
}

pub fn resolve_relative_length(
    ppi: Ppi,
    style_info: &StyleInfo,
    axis: usize,
    length: RelativeLength,
    full_length: f32,
) -> f32 {
    if length.is_relative {
        length.length * full_length
    } else {
        resolve_absolute_length(
            ppi,
            style_info,
            axis,
            AbsoluteLength::new(length.length, length.units),
        )
    }
}

pub fn resolve_box_border_width(
    ppi: Ppi,
    style_info: &StyleInfo,
    border: BoxBorderWidth<AbsoluteLength>,
) -> BoxBorderWidth<f32> {
    BoxBorderWidth {
        top: resolve_absolute_length(ppi, style_info, 1, border.top),
        right: resolve_absolute_length(ppi, style_info, 0, border.right),
        bottom: resolve_absolute_length(ppi, style_info, 1, border.bottom),
        left: resolve_absolute_length(ppi, style_info, 0, border.left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmagnified_pixels_bypass_magnification() {
        let style = StyleInfo { magnification: 2.0, ..Default::default() };
        let resolved = resolve_absolute_length(
            [96.0, 96.0],
            &style,
            0,
            AbsoluteLength::new(10.0, LengthUnit::UnmagnifiedPixels),
        );
        assert_eq!(resolved, 10.0);
    }

    #[test]
    fn inches_scale_by_ppi_and_magnification() {
        let style = StyleInfo { magnification: 1.5, ..Default::default() };
        let resolved = resolve_absolute_length(
            [96.0, 96.0],
            &style,
            0,
            AbsoluteLength::new(2.0, LengthUnit::Inches),
        );
        assert_eq!(resolved, 2.0 * 1.5 * 96.0);
    }

    #[test]
    fn relative_length_scales_full_length() {
        let style = StyleInfo::default();
        let resolved =
            resolve_relative_length([96.0, 96.0], &style, 0, RelativeLength::relative(0.5), 200.0);
        assert_eq!(resolved, 100.0);
    }
}
