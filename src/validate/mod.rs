//! Client-equivalent validation that runs before anything is processed:
//! upload gatekeeping (size and extension per field category) and generic
//! form validation (required fields, email shape).
//!
//! Both validators are pure; the handlers in [`crate::server`] turn their
//! results into re-rendered fragments and alert banners.

pub mod form;
pub mod upload;
