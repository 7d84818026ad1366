// SPDX-License-Identifier: MPL-2.0
//! Toast icons.
//!
//! The icons are small stroke SVGs embedded as strings. Markup output
//! inlines the source; the iced overlay renders them through cached
//! [`svg::Handle`]s created once on first access.

use iced::widget::svg::{self, Svg};
use iced::Length;
use std::sync::OnceLock;

/// Fixed set of icons used by toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Check mark (success).
    Check,
    /// Crossed circle (error).
    CircleCross,
    /// Warning triangle (warning).
    Triangle,
    /// Circled "i" (info and unknown types).
    CircleInfo,
    /// Close affordance.
    Close,
}

const CHECK_SVG: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><polyline points="20,6 9,17 4,12"></polyline></svg>"#;
const CIRCLE_CROSS_SVG: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"></circle><line x1="15" y1="9" x2="9" y2="15"></line><line x1="9" y1="9" x2="15" y2="15"></line></svg>"#;
const TRIANGLE_SVG: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3Z"></path><line x1="12" y1="9" x2="12" y2="13"></line><line x1="12" y1="17" x2="12.01" y2="17"></line></svg>"#;
const CIRCLE_INFO_SVG: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"></circle><line x1="12" y1="16" x2="12" y2="12"></line><line x1="12" y1="8" x2="12.01" y2="8"></line></svg>"#;
const CLOSE_SVG: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><line x1="18" y1="6" x2="6" y2="18"></line><line x1="6" y1="6" x2="18" y2="18"></line></svg>"#;

/// Defines a function returning a cached handle for an SVG source.
macro_rules! define_handle {
    ($name:ident, $source:ident) => {
        fn $name() -> svg::Handle {
            static HANDLE: OnceLock<svg::Handle> = OnceLock::new();
            HANDLE
                .get_or_init(|| svg::Handle::from_memory($source.as_bytes()))
                .clone()
        }
    };
}

define_handle!(check_handle, CHECK_SVG);
define_handle!(circle_cross_handle, CIRCLE_CROSS_SVG);
define_handle!(triangle_handle, TRIANGLE_SVG);
define_handle!(circle_info_handle, CIRCLE_INFO_SVG);
define_handle!(close_handle, CLOSE_SVG);

impl Icon {
    /// Returns the SVG source of the icon.
    #[must_use]
    pub fn svg_source(self) -> &'static str {
        match self {
            Icon::Check => CHECK_SVG,
            Icon::CircleCross => CIRCLE_CROSS_SVG,
            Icon::Triangle => TRIANGLE_SVG,
            Icon::CircleInfo => CIRCLE_INFO_SVG,
            Icon::Close => CLOSE_SVG,
        }
    }

    #[must_use]
    pub fn handle(self) -> svg::Handle {
        match self {
            Icon::Check => check_handle(),
            Icon::CircleCross => circle_cross_handle(),
            Icon::Triangle => triangle_handle(),
            Icon::CircleInfo => circle_info_handle(),
            Icon::Close => close_handle(),
        }
    }
}

/// Returns an SVG widget for the icon at the given square size.
pub fn sized<'a>(icon: Icon, size: f32) -> Svg<'a> {
    Svg::new(icon.handle())
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_source_is_an_svg_document() {
        for icon in [
            Icon::Check,
            Icon::CircleCross,
            Icon::Triangle,
            Icon::CircleInfo,
            Icon::Close,
        ] {
            let source = icon.svg_source();
            assert!(source.starts_with("<svg"));
            assert!(source.ends_with("</svg>"));
        }
    }

    #[test]
    fn severity_icons_are_distinct() {
        let sources = [
            Icon::Check.svg_source(),
            Icon::CircleCross.svg_source(),
            Icon::Triangle.svg_source(),
            Icon::CircleInfo.svg_source(),
        ];
        for (i, a) in sources.iter().enumerate() {
            for b in &sources[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
