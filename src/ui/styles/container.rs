// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, radius};
use crate::ui::notifications::Severity;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for the page sections.
///
/// The color is derived from the active Iced `Theme` background, with a slight
/// opacity, so panels stay readable in both light and dark modes without
/// hard-coding colors.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Server-rendered status banner that has not been adopted as a toast.
pub fn status_banner(severity: Severity) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| {
        let accent = severity.color();
        container::Style {
            background: Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..accent
            })),
            border: Border {
                color: accent,
                width: border::WIDTH_SM,
                radius: radius::SM.into(),
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_border_uses_severity_color() {
        let style = status_banner(Severity::Warning)(&Theme::Light);
        assert_eq!(style.border.color, Severity::Warning.color());
    }
}
