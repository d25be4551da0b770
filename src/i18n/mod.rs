// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Uses the Fluent localization system with `.ftl` files embedded at
//! compile time.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings, chosen once at startup
//! - Fallback to `en-US` when no preferred locale is available

pub mod fluent;
