pub mod batch;
pub mod cli;
pub mod error;
pub mod resolve;
pub mod transform;

pub use batch::{
    collect_image_files, is_supported_image, output_path_for, run_batch, BatchOptions, Outcome,
    RunSummary, SkipReason,
};
pub use error::{ConversionError, Result};
pub use resolve::{resolve_target_size, Dimensions, TargetSpec};
pub use transform::{
    apply_orientation, detect_exif_orientation, encode_webp, extract_icc_profile, load_image,
    transform_image, DecodedImage, EncodingSpec,
};
