use clap::Parser;
use rayon::ThreadPoolBuilder;
use std::process::ExitCode;
use webpify::batch::{run_batch, BatchOptions};
use webpify::cli::Args;
use webpify::resolve::TargetSpec;
use webpify::transform::EncodingSpec;

fn main() -> ExitCode {
    let args = Args::parse();
    setup_thread_pool(args.threads);

    // Argument validation is fatal and happens before any filesystem work
    let options = match build_options(args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_batch(&options) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_options(args: Args) -> webpify::Result<BatchOptions> {
    let target = TargetSpec::new(
        args.width,
        args.height,
        args.keep_aspect_ratio,
        args.no_upscale,
    )?;
    let encoding = EncodingSpec::new(args.quality, args.lossless)?;

    Ok(BatchOptions {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        target,
        encoding,
        overwrite: args.overwrite,
    })
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to set thread pool size: {}", e);
            });
    }
}
