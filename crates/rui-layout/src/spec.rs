//! The layout spec an application supplies at a call site, and its
//! resolution (against the current style/DPI context and a container's
//! default flags) into a [`ResolvedLayoutSpec`].

use crate::flags::LayoutFlags;
use crate::geometry::{as_layout_vector, LayoutVector};
use crate::units::{resolve_absolute_size, AbsoluteSize, Ppi, StyleInfo};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub size: AbsoluteSize,
    pub flags: LayoutFlags,
    /// 0 means "unspecified"; [`resolve_layout_spec`] substitutes 1 when a
    /// grow alignment is in effect and no explicit factor was given.
    pub growth_factor: f32,
}

pub fn add_default_size(layout_spec: Layout, size: AbsoluteSize) -> Layout {
    let mut adjusted = layout_spec;
    if adjusted.size.width.length <= 0.0 {
        adjusted.size.width = size.width;
    }
    if adjusted.size.height.length <= 0.0 {
        adjusted.size.height = size.height;
    }
    adjusted
}

pub fn add_default_padding(layout_spec: Layout, padded: bool) -> Layout {
    let mut adjusted = layout_spec;
    if adjusted.flags.padded.is_none() {
        adjusted.flags.padded = Some(padded);
    }
    adjusted
}

pub fn add_default_x_alignment(layout_spec: Layout, alignment: crate::flags::XAlignment) -> Layout {
    let mut adjusted = layout_spec;
    if adjusted.flags.x_alignment.is_none() {
        adjusted.flags.x_alignment = Some(alignment);
    }
    adjusted
}

pub fn add_default_y_alignment(layout_spec: Layout, alignment: crate::flags::YAlignment) -> Layout {
    let mut adjusted = layout_spec;
    if adjusted.flags.y_alignment.is_none() {
        adjusted.flags.y_alignment = Some(alignment);
    }
    adjusted
}

/// A layout spec once resolved against a style/DPI context and a
/// container's default flags: every field is now concrete, ready to feed
/// [`crate::requirements::resolve_requirements`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedLayoutSpec {
    pub size: LayoutVector,
    pub flags: LayoutFlags,
    pub growth_factor: i32,
    pub padding_size: LayoutVector,
}

pub fn resolve_layout_spec(
    ppi: Ppi,
    style_info: &StyleInfo,
    spec: Layout,
    default_flags: LayoutFlags,
) -> ResolvedLayoutSpec {
    let size = as_layout_vector(resolve_absolute_size(ppi, style_info, spec.size));
    let flags = spec.flags.or(default_flags);
    let padded = flags.padded.unwrap_or(false);
    let padding_size =
        if padded { LayoutVector::new(style_info.padding_size, style_info.padding_size) } else { LayoutVector::ZERO };
    let grows = flags.x_alignment.is_some_and(|a| a.implies_growth())
        || flags.y_alignment.is_some_and(|a| a.implies_growth());
    let growth_factor = if spec.growth_factor == 0.0 && grows { 1 } else { spec.growth_factor as i32 };
    ResolvedLayoutSpec { size, flags, growth_factor, padding_size }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::XAlignment;
    use crate::units::{AbsoluteLength, LengthUnit};

    #[test]
    fn grow_alignment_defaults_growth_factor_to_one() {
        let spec = Layout {
            size: AbsoluteSize::default(),
            flags: LayoutFlags::x(XAlignment::Grow),
            growth_factor: 0.0,
        };
        let resolved = resolve_layout_spec([96.0, 96.0], &StyleInfo::default(), spec, LayoutFlags::NONE);
        assert_eq!(resolved.growth_factor, 1);
    }

    #[test]
    fn unpadded_default_yields_zero_padding() {
        let spec = Layout::default();
        let resolved = resolve_layout_spec(
            [96.0, 96.0],
            &StyleInfo::default(),
            spec,
            LayoutFlags::fill_unpadded(),
        );
        assert_eq!(resolved.padding_size, LayoutVector::ZERO);
    }

    #[test]
    fn explicit_size_resolves_through_units() {
        let spec = Layout {
            size: AbsoluteSize::new(AbsoluteLength::new(10.0, LengthUnit::Pixels), AbsoluteLength::default()),
            ..Default::default()
        };
        let resolved = resolve_layout_spec([96.0, 96.0], &StyleInfo::default(), spec, LayoutFlags::NONE);
        assert_eq!(resolved.size.x(), 10);
    }
}
