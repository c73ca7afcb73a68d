//! Page layout for generated PDFs.

use headless_chrome::types::PrintToPdfOptions;

/// Paper size, margins and print flags, in inches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PdfOptions {
    pub paper_width: f64,
    pub paper_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Print background colors and images.
    pub print_background: bool,
    /// Let the browser add its own header and footer.
    pub display_header_footer: bool,
}

impl PdfOptions {
    /// A4 portrait with 0.4 inch margins, backgrounds on, no browser header or
    /// footer.
    pub const A4: Self = Self {
        paper_width: 8.27,
        paper_height: 11.7,
        margin_top: 0.4,
        margin_bottom: 0.4,
        margin_left: 0.4,
        margin_right: 0.4,
        print_background: true,
        display_header_footer: false,
    };
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self::A4
    }
}

impl From<&PdfOptions> for PrintToPdfOptions {
    fn from(options: &PdfOptions) -> Self {
        Self {
            paper_width: Some(options.paper_width),
            paper_height: Some(options.paper_height),
            margin_top: Some(options.margin_top),
            margin_bottom: Some(options.margin_bottom),
            margin_left: Some(options.margin_left),
            margin_right: Some(options.margin_right),
            print_background: Some(options.print_background),
            display_header_footer: Some(options.display_header_footer),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_a4() {
        let options = PdfOptions::default();
        assert_eq!(options, PdfOptions::A4);
        assert!((options.paper_width - 8.27).abs() < f64::EPSILON);
        assert!((options.paper_height - 11.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_into_print_options() {
        let print: PrintToPdfOptions = (&PdfOptions::A4).into();
        assert_eq!(print.print_background, Some(true));
        assert_eq!(print.display_header_footer, Some(false));
        assert_eq!(print.margin_left, Some(0.4));
        assert_eq!(print.landscape, None);
    }
}
