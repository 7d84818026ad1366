// SPDX-License-Identifier: MPL-2.0
//! `storefront_toasts` presents transient toast notifications for a storefront.
//!
//! It adopts the status banners a server-rendered page carries, turns
//! storefront events and response headers into toasts, and gives POST forms
//! a loading state while they submit. The [`app`] module hosts a small Iced
//! window around one page [`session::Session`].

#![doc(html_root_url = "https://docs.rs/storefront_toasts/0.1.0")]

pub mod app;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod forms;
pub mod net;
pub mod page;
pub mod scheduler;
pub mod session;
pub mod ui;
