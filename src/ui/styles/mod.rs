// SPDX-License-Identifier: MPL-2.0
//! Shared styles for the demo storefront page.

pub mod button;
pub mod container;

pub use button::{primary as button_primary, secondary as button_secondary};
