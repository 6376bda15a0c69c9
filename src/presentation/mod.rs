//! Presentation layer with the command dispatcher, view bindings and renderers.

mod app;
/// Background image preloading tied to what a page shows.
pub mod binding;
/// Plain-text page renderers.
pub mod views;

pub use app::App;
pub use binding::{PreloadBinding, PreloadProgress, ProgressBinding};
