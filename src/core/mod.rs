//! Cross-cutting helpers shared by every module.

#[macro_use]
pub mod log;
