// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: Display durations and exit animation timing
//! - **Network**: Response header names carrying notification metadata
//! - **Forms**: Submit button loading feedback
//! - **Diagnostics**: Event buffer bounds

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Duration used by `show` when the caller does not pass one (milliseconds).
pub const DEFAULT_DURATION_MS: i64 = 4000;

/// Duration given to notifications adopted from server-rendered banners.
pub const SERVER_MESSAGE_DURATION_MS: i64 = 4000;

/// Default duration of `Manager::success` (milliseconds).
pub const SUCCESS_DURATION_MS: i64 = 3000;

/// Default duration of `Manager::error` (milliseconds).
pub const ERROR_DURATION_MS: i64 = 5000;

/// Default duration of `Manager::warning` (milliseconds).
pub const WARNING_DURATION_MS: i64 = 4000;

/// Default duration of `Manager::info` (milliseconds).
pub const INFO_DURATION_MS: i64 = 3000;

/// Time a hidden toast stays attached while its exit animation plays.
pub const EXIT_DELAY_MS: u64 = 300;

/// Minimum exit delay accepted from a config file.
pub const MIN_EXIT_DELAY_MS: u64 = 0;

/// Maximum exit delay accepted from a config file.
pub const MAX_EXIT_DELAY_MS: u64 = 5000;

/// Interval of the UI tick driving timers (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 50;

// ==========================================================================
// Cart Event Defaults
// ==========================================================================

/// Duration of cart update, add and remove notifications.
pub const CART_EVENT_DURATION_MS: i64 = 3000;

/// Duration of quantity update notifications.
pub const CART_QUANTITY_DURATION_MS: i64 = 2500;

// ==========================================================================
// Network Defaults
// ==========================================================================

/// Response header carrying the notification message.
pub const MESSAGE_HEADER: &str = "X-Notification-Message";

/// Response header carrying the notification type.
pub const TYPE_HEADER: &str = "X-Notification-Type";

// ==========================================================================
// Form Defaults
// ==========================================================================

/// Label shown on a submit control while a POST form is submitting.
pub const LOADING_LABEL: &str = "Chargement...";

/// Delay before a submit control gets its label and state back.
pub const SUBMIT_RESTORE_DELAY_MS: u64 = 2000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_EXIT_DELAY_MS <= EXIT_DELAY_MS);
    assert!(EXIT_DELAY_MS <= MAX_EXIT_DELAY_MS);
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY <= DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(TICK_INTERVAL_MS > 0);
};
