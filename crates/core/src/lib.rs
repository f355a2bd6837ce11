//! Shared infrastructure for the menura registries.
//!
//! This crate provides the collaborator contracts the registries build on:
//! - [`Disposable`] / [`DisposableCollection`]: idempotent revocation handles
//! - [`Emitter`] / [`Event`]: synchronous, payload-free change broadcast
//! - [`ContributionProvider`]: ordered startup contribution discovery

mod contribution;
mod dispose;
mod event;

pub use contribution::ContributionProvider;
pub use dispose::{Disposable, DisposableCollection};
pub use event::{Emitter, Event};
