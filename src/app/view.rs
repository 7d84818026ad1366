// SPDX-License-Identifier: MPL-2.0
//! View rendering for the demo storefront.
//!
//! The page shows what the session knows about the loaded document (banners
//! that were not adopted, forms and their submit controls), a few buttons
//! that fire storefront events, and the toast overlay on top.

use super::Message;
use crate::events::StorefrontEvent;
use crate::page::{Document, Form};
use crate::session::Session;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::notifications::Toast;
use crate::ui::styles;
use iced::widget::{button, scrollable, text, Column, Container, Row, Stack, Text};
use iced::{Element, Length, Theme};

/// Product used by the cart event buttons.
pub const SAMPLE_PRODUCT: &str = "Rose Oud";

const DEFAULT_TITLE: &str = "Storefront";

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub session: &'a Session,
    pub config_warning: Option<&'a str>,
}

/// Renders the page with the toast overlay stacked on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let document = ctx.session.document();

    let mut page = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .width(Length::Fill)
        .push(Text::new(page_title(document)).size(typography::TITLE_MD));

    if let Some(warning) = ctx.config_warning {
        page = page.push(
            Text::new(warning)
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::WARNING_500),
                }),
        );
    }

    if let Some(banners) = view_banners(document) {
        page = page.push(banners);
    }

    page = page.push(section("Panier", view_event_buttons()));

    if !document.forms().is_empty() {
        let forms = document
            .forms()
            .iter()
            .fold(Column::new().spacing(spacing::SM), |column, form| {
                column.push(view_form(form))
            });
        page = page.push(section("Formulaires", forms.into()));
    }

    let overlay = Toast::view_overlay(ctx.session.manager()).map(Message::Notification);

    Stack::new()
        .push(
            scrollable(page)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(overlay)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Returns the document title, or a generic one.
pub fn page_title(document: &Document) -> &str {
    document
        .title()
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_TITLE)
}

fn section<'a>(title: &'a str, content: Element<'a, Message>) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(title).size(typography::BODY))
            .push(content),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}

/// Banners still on the page (empty ones are never adopted).
fn view_banners(document: &Document) -> Option<Element<'_, Message>> {
    let visible: Vec<Element<'_, Message>> = document
        .status_elements()
        .iter()
        .filter(|element| !element.is_hidden())
        .map(|element| {
            Container::new(Text::new(element.text()).size(typography::BODY))
                .width(Length::Fill)
                .padding(spacing::SM)
                .style(styles::container::status_banner(element.severity()))
                .into()
        })
        .collect();

    if visible.is_empty() {
        None
    } else {
        Some(Column::with_children(visible).spacing(spacing::XS).into())
    }
}

fn view_event_buttons<'a>() -> Element<'a, Message> {
    let product = || SAMPLE_PRODUCT.to_string();
    let events = [
        ("Ajouter", StorefrontEvent::CartItemAdded { product_name: product() }),
        ("Retirer", StorefrontEvent::CartItemRemoved { product_name: product() }),
        (
            "Quantité",
            StorefrontEvent::CartQuantityUpdated { product_name: product() },
        ),
        ("Mettre à jour", StorefrontEvent::CartUpdated),
    ];

    let mut row = Row::new().spacing(spacing::XS);
    for (label, event) in events {
        row = row.push(
            button(text(label).size(typography::BODY))
                .padding(spacing::XS)
                .style(styles::button_secondary)
                .on_press(Message::Dispatch(event)),
        );
    }

    row.push(
        button(text("Exemples").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button_secondary)
            .on_press(Message::ShowSamples),
    )
    .push(
        button(text("Tout masquer").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button_secondary)
            .on_press(Message::HideAll),
    )
    .into()
}

fn view_form(form: &Form) -> Element<'_, Message> {
    let description = format!(
        "{} {}",
        form.method().to_uppercase(),
        form.action().unwrap_or("")
    );

    let mut row = Row::new()
        .spacing(spacing::SM)
        .push(Text::new(description).size(typography::CAPTION).width(Length::Fill));

    if let Some(control) = form.submit_control() {
        let submit = button(text(control.label.as_str()).size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button_primary)
            .on_press_maybe((!control.disabled).then_some(Message::Submit(form.id())));
        row = row.push(submit);
    }

    row.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_title_falls_back_when_missing() {
        let mut document = Document::new();
        assert_eq!(page_title(&document), DEFAULT_TITLE);

        document.set_title("");
        assert_eq!(page_title(&document), DEFAULT_TITLE);

        document.set_title("Parfumerie");
        assert_eq!(page_title(&document), "Parfumerie");
    }
}
