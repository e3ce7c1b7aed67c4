//! Scroll/cursor model above `core-reader`: a chromosome-boundary-aware
//! position cursor ([`Position`]), a small bounded cache of open chromosome
//! readers ([`ReaderCache`]), and the scroll engine ([`View`]) that walks
//! `top_pos` by whole screen lines.
//!
//! Color resolution and the actual terminal paint loop (`fill`) live in
//! `core-render`, which composes these primitives with `core-config`'s
//! palette; this crate only knows about chromosome positions and reader
//! lifetime, never about color pairs or glyphs.

mod cache;
mod position;
mod view;

pub use cache::ReaderCache;
pub use position::Position;
pub use view::View;
