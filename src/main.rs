use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hadaqr::{max_chunk_size, ECLevel, HadamardEncoder, PlanMode, QrChunker, QrEmitter};

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Hadamard-encode data and pack it into QR codes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Encode text, or a string of 0s and 1s, into Hadamard codewords.
    Encode {
        text: String,
        /// Code order K.
        #[arg(short, long, default_value_t = 8)]
        k: u32,
    },
    /// Encode a grayscale image and save the serialized grid as QR codes.
    EncodeImage {
        path: PathBuf,
        /// Code order K, at least 7.
        #[arg(short, long, default_value_t = 8)]
        k: u32,
        /// Only print the encoded grid.
        #[arg(long)]
        no_qr: bool,
        #[command(flatten)]
        qr: QrOpt,
    },
    /// Save arbitrary data as a sequence of QR codes.
    GenerateQr {
        data: String,
        #[command(flatten)]
        qr: QrOpt,
    },
    /// Print how many leading characters of the data fit one version 40 QR code.
    Capacity {
        data: String,
        #[arg(long, default_value_t = ECLevel::M)]
        ec_level: ECLevel,
    },
}

#[derive(Clone, Debug, Args)]
struct QrOpt {
    /// Output directory. Cleared before every run.
    #[arg(long, default_value = "static/qrcodes")]
    out: PathBuf,
    #[arg(long, default_value_t = ECLevel::M)]
    ec_level: ECLevel,
    /// Probe the capacity again for every chunk.
    #[arg(long)]
    reprobe: bool,
    /// Pixels per module.
    #[arg(long, default_value_t = 10)]
    module_size: u32,
    /// Quiet zone width in modules.
    #[arg(long, default_value_t = 4)]
    border: u32,
}

impl QrOpt {
    fn chunker(&self) -> QrChunker {
        let mode = if self.reprobe { PlanMode::Reprobe } else { PlanMode::Uniform };
        let mut chunker = QrChunker::new(&self.out);
        chunker.ec_level(self.ec_level).mode(mode).module_size(self.module_size).border(self.border);
        chunker
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let output = match Cli::parse().command {
        Command::Encode { text, k } => {
            let encoder = HadamardEncoder::new(k)?;
            let encoded = encoder.encode_auto(&text)?;
            json!({ "kind": encoded.kind.to_string(), "encoded": encoded.bits })
        }
        Command::EncodeImage { path, k, no_qr, qr } => {
            let encoder = HadamardEncoder::new(k)?;
            let encoded = encoder
                .encode_image_file(&path)
                .with_context(|| format!("failed to encode {}", path.display()))?;
            info!("Encoded {} image with shape {:?}", path.display(), encoded.shape());
            let images = if no_qr {
                vec![]
            } else {
                qr.chunker().run(&encoded.to_json()?)?.images
            };
            json!({ "encoded": encoded.to_nested(), "images": images })
        }
        Command::GenerateQr { data, qr } => {
            let run = qr.chunker().run(&data)?;
            json!({ "capacity": run.capacity, "images": run.images })
        }
        Command::Capacity { data, ec_level } => {
            let capacity = max_chunk_size(&QrEmitter::default(), &data, ec_level)?;
            json!({ "capacity": capacity, "chars": data.chars().count() })
        }
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
