//! The library code for the `tempo` blog front-end. A build has two halves:
//!
//! 1. Loading data: the post list ([`crate::post`]) and the documents in the
//!    content directory ([`crate::content`]), whose titles are extracted with
//!    [`crate::title`] and reported.
//! 2. Rendering the index page ([`crate::write`]): every post becomes a card
//!    labelled with how long ago it was updated ([`crate::timeago`]).
//!
//! The time and title logic is pure. The current time always comes from a
//! [`crate::clock::Clock`] so it can be fixed in tests.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod clock;
pub mod config;
pub mod content;
pub mod markdown;
pub mod post;
pub mod timeago;
pub mod title;
mod util;
pub mod write;
