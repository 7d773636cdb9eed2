//! Rendering for unit previews.
//!
//! `compose` turns a layer collection and its resolved layout into a
//! surface-independent `RenderDescription`. The HTML and PNG surfaces both
//! consume that description.

mod html;
mod locator;
mod png;
mod scene;
mod zoom;

pub use html::{html_page, write_html, HtmlOptions};
pub use locator::{AssetLocator, FileUrl, RelativeTo, Verbatim};
pub use png::{composite, write_png, Canvas, Composite, MissingAsset};
pub use scene::{compose, FrameGeometry, PlacedLayer, RenderDescription};
pub use zoom::{ZoomSettings, ZoomState};
