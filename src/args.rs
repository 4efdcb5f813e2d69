use clap::Parser;

/// Edge detection CLI Application
#[derive(Parser, Debug)]
#[command(author, version, about = "A CLI tool to detect edges in images", long_about = None)]
pub struct Args {
    /// Input image path
    #[arg(short = 'i', long, value_name = "FILE", required = true, help = "Path to the input image file")]
    pub input: String,

    /// Output image path
    #[arg(short = 'o', long, value_name = "FILE", default_value = "", help = "Path to the output edge image (default: {input}_edges.{ext})")]
    pub output: String,

    /// Edge-detecting algorithm
    #[arg(short = 'm', long, value_name = "NAME", default_value = "sobel", help = "Edge-detecting method: canny, sobel or prewitt")]
    pub method: String,

    /// Skip the interactive side-by-side window
    #[arg(long, default_value_t = false, help = "Do not display the result, only save it")]
    pub no_display: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["image_edges", "-i", "cells.png"]);
        assert_eq!(args.input, "cells.png");
        assert_eq!(args.output, "");
        assert_eq!(args.method, "sobel");
        assert!(!args.no_display);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "image_edges", "--input", "a.png", "--output", "b.tif", "--method", "canny", "--no-display",
        ]);
        assert_eq!(args.output, "b.tif");
        assert_eq!(args.method, "canny");
        assert!(args.no_display);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["image_edges", "-o", "out.png"]).is_err());
    }
}
