//! Display attribute descriptors for composition rendering.
//!
//! Only the data contract lives here; resolving descriptors to concrete visual
//! styles is left to the renderer.

use crate::range::CharIdx;

/// How a color slot is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayColor {
	/// Use the renderer's default.
	#[default]
	None,
	/// A system color index.
	System(u32),
	/// An explicit `0x00BBGGRR` color.
	Rgb(u32),
}

/// Underline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
	/// No underline.
	#[default]
	None,
	/// Solid line.
	Solid,
	/// Dotted line.
	Dot,
	/// Dashed line.
	Dash,
	/// Wavy line.
	Squiggle,
}

/// Conversion state of the decorated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttrInfo {
	/// Raw input not yet converted.
	#[default]
	Input,
	/// Being converted, currently targeted.
	TargetConverted,
	/// Converted.
	Converted,
	/// Targeted but not converted.
	TargetNotConverted,
	/// Input the engine could not convert.
	InputError,
	/// Converted and fixed.
	FixedConverted,
	/// Anything else.
	Other,
}

/// A display attribute descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayAttribute {
	/// Text color.
	pub text_color: DisplayColor,
	/// Background color.
	pub background_color: DisplayColor,
	/// Underline style.
	pub line_style: LineStyle,
	/// Whether the underline is bold.
	pub bold_line: bool,
	/// Underline color.
	pub line_color: DisplayColor,
	/// Conversion state.
	pub info: AttrInfo,
}

/// A sub-range of text carrying a display attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayAttributeSpan {
	/// First character (inclusive).
	pub start: CharIdx,
	/// End (exclusive).
	pub end: CharIdx,
	/// The resolved descriptor.
	pub attribute: DisplayAttribute,
}
