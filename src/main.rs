use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrgen::{encode_text, CapacityTable, ECLevel, MaskPattern, QRBuilder, QRError, Version};

#[derive(Parser)]
#[command(name = "qrgen", about = "Byte mode QR code generator")]
struct Cli {
    /// Text to encode
    text: String,
    /// Error correction level
    #[arg(long, default_value = "M")]
    ecc: ECLevel,
    /// Force a version (1-40) instead of the smallest that fits
    #[arg(long, value_parser = parse_version)]
    version: Option<Version>,
    /// Force a mask (0-7) instead of the lowest penalty one
    #[arg(long, value_parser = parse_mask)]
    mask: Option<MaskPattern>,
    /// Transcode the text to this character set before encoding
    #[arg(long, default_value = "UTF-8")]
    charset: String,
    /// Pixels per module in the output image
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
    /// PNG file to write; the symbol is printed to the terminal otherwise
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_version(s: &str) -> Result<Version, QRError> {
    let v = s.trim().parse::<usize>().map_err(|_| QRError::InvalidVersion)?;
    Version::new(v)
}

fn parse_mask(s: &str) -> Result<MaskPattern, QRError> {
    let m = s.trim().parse::<u8>().map_err(|_| QRError::InvalidMaskingPattern)?;
    MaskPattern::new(m)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let table = CapacityTable::standard()?;
    let data = encode_text(&cli.text, &cli.charset)?;

    let mut builder = QRBuilder::new(&data);
    builder.ec_level(cli.ecc);
    if let Some(v) = cli.version {
        builder.version(v);
    }
    if let Some(m) = cli.mask {
        builder.mask(m);
    }
    let qr = builder.build(&table)?;

    match &cli.output {
        Some(path) => {
            qr.render(cli.scale).save(path)?;
            info!(path = %path.display(), "Saved QR image");
        }
        None => print!("{}", qr.to_str(1)),
    }

    println!("Mask: {}", qr.mask());
    println!("Penalty: {}", qr.penalty());
    println!("Module size: {}px", cli.scale);
    println!("Version: {}", qr.version());
    println!("ECC: {}", qr.ec_level());

    Ok(())
}
