//! Alignment and padding flags carried by a [`crate::spec::Layout`] spec.
//!
//! The source system packs these into a single bitmask shared with the
//! growth-factor/proportional-grow codes; expressed here as plain enums
//! instead, since Rust has no need to economize on a flags word and the enum
//! form makes "no alignment specified, fall back to the container default"
//! a simple `Option::None` rather than a mask-membership test.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAlignment {
    Center,
    Left,
    Right,
    Fill,
    Grow,
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAlignment {
    Center,
    Top,
    Bottom,
    Fill,
    Grow,
    Baseline,
}

impl XAlignment {
    /// Does this alignment imply a default growth factor of 1 if the spec
    /// didn't provide one?
    pub fn implies_growth(&self) -> bool {
        matches!(self, XAlignment::Grow)
    }
}

impl YAlignment {
    pub fn implies_growth(&self) -> bool {
        matches!(self, YAlignment::Grow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutFlags {
    pub x_alignment: Option<XAlignment>,
    pub y_alignment: Option<YAlignment>,
    pub padded: Option<bool>,
}

impl LayoutFlags {
    pub const NONE: LayoutFlags = LayoutFlags { x_alignment: None, y_alignment: None, padded: None };

    pub fn x(alignment: XAlignment) -> Self {
        Self { x_alignment: Some(alignment), ..Self::NONE }
    }

    pub fn y(alignment: YAlignment) -> Self {
        Self { y_alignment: Some(alignment), ..Self::NONE }
    }

    pub fn padding(padded: bool) -> Self {
        Self { padded: Some(padded), ..Self::NONE }
    }

    /// Fill both axes, unpadded — the default the source system uses for
    /// containers nested inside another container.
    pub fn fill_unpadded() -> Self {
        Self {
            x_alignment: Some(XAlignment::Fill),
            y_alignment: Some(YAlignment::Fill),
            padded: Some(false),
        }
    }

    /// Grow both axes, unpadded — forced on uniform-grid rows so each row
    /// receives an equal share of the grid's assigned height.
    pub fn grow_unpadded() -> Self {
        Self {
            x_alignment: Some(XAlignment::Grow),
            y_alignment: Some(YAlignment::Grow),
            padded: Some(false),
        }
    }

    /// Fill whichever of `self`'s fields are unset with `defaults`'.
    pub fn or(self, defaults: LayoutFlags) -> LayoutFlags {
        LayoutFlags {
            x_alignment: self.x_alignment.or(defaults.x_alignment),
            y_alignment: self.y_alignment.or(defaults.y_alignment),
            padded: self.padded.or(defaults.padded),
        }
    }
}
