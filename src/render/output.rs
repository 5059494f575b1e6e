use super::{RenderConfig, RenderError, Result};

/// File formats produced for every plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Png,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Pdf, OutputFormat::Png];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
        }
    }

    pub fn encode(self, svg: &str, config: &RenderConfig) -> Result<Vec<u8>> {
        match self {
            OutputFormat::Pdf => svg_to_pdf(svg),
            OutputFormat::Png => svg_to_png(svg, config.dpi),
        }
    }
}

fn parse_svg(svg: &str) -> Result<usvg::Tree> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    usvg::Tree::from_str(svg, &opt).map_err(|e| RenderError::Svg(e.to_string()))
}

/// Convert SVG string to PNG bytes at the given DPI.
pub fn svg_to_png(svg: &str, dpi: u32) -> Result<Vec<u8>> {
    let tree = parse_svg(svg)?;

    let scale = dpi as f32 / 96.0;
    let size = tree.size();
    let w = (size.width() * scale).ceil() as u32;
    let h = (size.height() * scale).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| RenderError::Png(format!("cannot create a {w}x{h} pixmap")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    // Opaque background, so premultiplied and straight alpha agree.
    let image = image::RgbaImage::from_raw(w, h, pixmap.take())
        .ok_or_else(|| RenderError::Png("pixmap size mismatch".into()))?;
    let mut bytes = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(|e| RenderError::Png(e.to_string()))?;
    Ok(bytes.into_inner())
}

/// Convert SVG string to PDF bytes.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let tree = parse_svg(svg)?;
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), svg2pdf::PageOptions::default())
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="0 0 40 20"><rect x="5" y="5" width="30" height="10" fill="#ff0000"/></svg>"##;

    #[test]
    fn png_has_signature_and_scaled_size() {
        let bytes = svg_to_png(SVG, 192).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 80);
        assert_eq!(decoded.height(), 40);
    }

    #[test]
    fn pdf_has_header() {
        let bytes = svg_to_pdf(SVG).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn invalid_svg_is_rejected() {
        assert!(matches!(svg_to_png("not svg", 96), Err(RenderError::Svg(_))));
    }

    #[test]
    fn extensions() {
        let exts: Vec<&str> = OutputFormat::ALL.iter().map(|f| f.extension()).collect();
        assert_eq!(exts, vec!["pdf", "png"]);
    }
}
