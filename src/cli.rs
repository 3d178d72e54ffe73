use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "webpify",
    about = "Batch-resize a folder of images and convert them to WebP",
    long_about = "webpify processes every JPG/JPEG/PNG image in a folder: each image is \
                  resized to a target footprint and re-encoded as WebP, lossy or lossless. \
                  EXIF orientation is applied to the pixels and embedded ICC color profiles \
                  are carried over unmodified.",
    version,
    after_help = "EXAMPLES:\n  \
    webpify ./photos ./web 1600 1200 80 --keep-aspect-ratio --no-upscale\n  \
    webpify ./shots ./out 800 800 90 --overwrite\n  \
    webpify ./scans ./archive 4000 4000 100 --lossless"
)]
pub struct Args {
    #[arg(help = "Input directory containing JPG/JPEG/PNG images")]
    pub input_dir: PathBuf,

    #[arg(help = "Output directory for the converted WebP files")]
    pub output_dir: PathBuf,

    #[arg(help = "Target width in pixels")]
    pub width: u32,

    #[arg(help = "Target height in pixels")]
    pub height: u32,

    #[arg(help = "WebP quality (0-100, ignored with --lossless)")]
    pub quality: u8,

    #[arg(
        long,
        help = "Preserve the aspect ratio when resizing",
        long_help = "Scale both axes by a single factor so the result fits inside the \
                     target box without distortion."
    )]
    pub keep_aspect_ratio: bool,

    #[arg(
        long,
        help = "Never enlarge images already smaller than the target",
        long_help = "Images smaller than the target box are converted at their original \
                     size instead of being upscaled."
    )]
    pub no_upscale: bool,

    #[arg(long, help = "Encode lossless WebP (the quality value is ignored)")]
    pub lossless: bool,

    #[arg(long, help = "Overwrite existing files in the output directory")]
    pub overwrite: bool,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of threads for parallel processing. \
                     If not specified, uses number of CPU cores."
    )]
    pub threads: Option<usize>,
}
