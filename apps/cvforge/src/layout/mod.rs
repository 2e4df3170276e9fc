// Capture layout: positions the rendered document in CSS pixels so it can be rasterized.
// Pure and CPU-bound; callers on the async runtime go through `spawn_blocking`.

pub mod flow;
pub mod font_metrics;

pub use flow::{layout_document, PageLayout, PaintItem, PaintKind, Rect, Rgb};
