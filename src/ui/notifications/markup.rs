// SPDX-License-Identifier: MPL-2.0
//! HTML rendering of the toast container.
//!
//! Produces the markup the storefront stylesheet expects. Every piece of
//! caller-supplied text goes through [`quick_xml::escape::escape`], so a
//! message can never inject markup into the page.

use super::manager::Manager;
use super::notification::Notification;
use crate::ui::icons::Icon;
use quick_xml::escape::escape;
use std::fmt::Write;

/// Class of the container element.
pub const CONTAINER_CLASS: &str = "notification-container";

/// Renders the whole container with every attached toast, in display order.
#[must_use]
pub fn render(manager: &Manager) -> String {
    let mut html = format!(r#"<div class="{CONTAINER_CLASS}">"#);
    for notification in manager.visible() {
        html.push_str(&render_notification(notification));
    }
    html.push_str("</div>");
    html
}

/// Renders a single toast node.
#[must_use]
pub fn render_notification(notification: &Notification) -> String {
    let id = notification.id().to_string();
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<div class="{classes}" data-id="{id}"><div class="notification-content"><div class="notification-icon">{icon}</div><div class="notification-message">{message}</div><button class="notification-close" data-id="{id}">{close}</button></div>"#,
        classes = notification.class_list().join(" "),
        icon = notification.icon().svg_source(),
        message = escape(notification.message()),
        close = Icon::Close.svg_source(),
    );

    if let Some(duration) = notification.lifetime().duration() {
        let _ = write!(
            html,
            r#"<div class="notification-progress" style="animation-duration: {}ms;"></div>"#,
            duration.as_millis()
        );
    }

    html.push_str("</div>");
    html
}
