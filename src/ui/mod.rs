// SPDX-License-Identifier: MPL-2.0
//! User interface components.

pub mod design_tokens;
pub mod notifications;
pub mod viewer;
