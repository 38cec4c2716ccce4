// SPDX-License-Identifier: MPL-2.0
//! `iced_gallery` is a swipeable full-screen image gallery built with the
//! Iced GUI framework.
//!
//! It opens a set of images as a circular gallery with gesture-driven
//! paging, drag-down dismissal, per-image and batch downloads, and
//! demonstrates internationalization with Fluent and toast-based user
//! feedback.

#![doc(html_root_url = "https://docs.rs/iced_gallery/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod ui;
