// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo storefront.

use crate::events::StorefrontEvent;
use crate::page::FormId;
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Notification(notifications::NotificationMessage),
    /// An application event fired by the page.
    Dispatch(StorefrontEvent),
    /// A form of the page was submitted.
    Submit(FormId),
    /// Shows one toast of every severity through the convenience API.
    ShowSamples,
    HideAll,
    /// Periodic tick driving toast and submit timers.
    Tick(Instant),
}

/// Runtime flags passed from the CLI.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Server-rendered page to load.
    pub page_path: Option<PathBuf>,
    /// Optional config directory override.
    pub config_dir: Option<PathBuf>,
}
