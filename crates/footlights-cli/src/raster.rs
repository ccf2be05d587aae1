//! PNG output, rasterized from the rendered SVG.

use anyhow::{anyhow, Context as _};
use resvg::{tiny_skia, usvg};

/// Rasterizes an SVG document at its own size and encodes it as PNG.
pub fn svg_to_png(svg: &str) -> anyhow::Result<Vec<u8>> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .context("failed to parse rendered svg")?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow!("failed to allocate a {}x{} pixmap", size.width(), size.height()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    log::debug!("rasterized {}x{} svg", size.width(), size.height());

    pixmap.encode_png().context("failed to encode png")
}
