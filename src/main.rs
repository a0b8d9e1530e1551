//! `imgwave` CLI - transcode images to float WAV audio and back.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgwave::{Config, Error, Language, Transcoder};

/// Store an image as a float audio waveform, or restore it.
#[derive(Parser, Debug)]
#[command(name = "imgwave")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Worker threads for the sample transform.
    #[arg(short, long, default_value = "4", value_name = "INT", global = true)]
    workers: usize,

    /// Sample rate written to WAV files.
    #[arg(long, default_value = "44100", value_name = "HZ", global = true)]
    sample_rate: u32,

    /// Output JPEG quality (1-100) when decoding to .jpg.
    #[arg(short, long, default_value = "95", value_name = "INT", global = true)]
    quality: u8,

    /// Language for result messages.
    #[arg(long, value_enum, default_value_t = Lang::En, global = true)]
    lang: Lang,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode an image into a WAV file.
    Encode {
        /// Input image path.
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Output WAV path.
        #[arg(value_name = "AUDIO")]
        audio: PathBuf,
    },

    /// Decode a WAV file back into an image.
    Decode {
        /// Input WAV path.
        #[arg(value_name = "AUDIO")]
        audio: PathBuf,

        /// Output image path; the extension picks the format.
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Lang {
    En,
    ZhTw,
}

impl From<Lang> for Language {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::En => Self::English,
            Lang::ZhTw => Self::TraditionalChinese,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgwave={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        if matches!(err.downcast_ref::<Error>(), Some(Error::LengthMismatch { .. })) {
            eprintln!("{}", Language::from(args.lang).messages().decode_error);
        }
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = Config {
        workers: args.workers,
        sample_rate: args.sample_rate,
        output_quality: args.quality,
        language: args.lang.into(),
    };
    let messages = config.language.messages();

    let transcoder = Transcoder::new(config).context("Failed to initialize transcoder")?;

    let pb = ProgressBar::new(1000);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {percent}%")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    match &args.command {
        Command::Encode { image, audio } => {
            if !image.exists() {
                anyhow::bail!("Input file does not exist: {}", image.display());
            }
            transcoder
                .encode_file(image, audio, &pb)
                .context("Failed to encode image")?;
            pb.finish_and_clear();
            println!("{}: {} -> {}", messages.encode_success, image.display(), audio.display());
        }
        Command::Decode { audio, image } => {
            if !audio.exists() {
                anyhow::bail!("Input file does not exist: {}", audio.display());
            }
            transcoder
                .decode_file(audio, image, &pb)
                .context("Failed to decode audio")?;
            pb.finish_and_clear();
            println!("{}: {} -> {}", messages.decode_success, audio.display(), image.display());
        }
    }

    Ok(())
}
