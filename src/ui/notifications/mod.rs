// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for storefront feedback.
//!
//! Toasts appear temporarily to report what just happened (a cart update,
//! a saved form, a server-side status message) without blocking the page.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` owning the container, registry and timers
//! - [`notifier`] - `Notifier`, a cloneable handle for other threads
//! - [`toast`] - Toast widget for the iced overlay
//! - [`markup`] - HTML rendering of the container
//!
//! # Usage
//!
//! ```
//! use storefront_toasts::ui::notifications::{Lifetime, Manager, Severity};
//!
//! let mut manager = Manager::new();
//! let id = manager.show("Commande confirmée", Severity::Success, Lifetime::from_millis(3000));
//! assert!(manager.contains(id));
//!
//! manager.hide(id);
//! ```

pub mod manager;
pub mod markup;
pub mod notification;
pub mod notifier;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, Settings};
pub use notification::{ExitDelay, Lifetime, Notification, NotificationId, Phase, Severity};
pub use notifier::Notifier;
pub use toast::Toast;
