//! # qrgen
//!
//! A Rust library for generating byte mode QR codes with Reed-Solomon error correction
//! and penalty driven mask selection.
//!
//! ## Features
//!
//! - **Byte Mode Encoding**: Arbitrary bytes, versions 1 to 40, error correction levels L, M, Q and H
//! - **Automatic Configuration**: Smallest fitting version and lowest penalty mask are picked unless forced
//! - **Reed-Solomon Error Correction**: Parity over GF(256), blockified and interleaved per version
//! - **Rendering**: Grayscale images with a quiet zone, or plain text for terminals
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrgen::{generate, CapacityTable, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // The capacity table is built once and shared by every symbol
//! let table = CapacityTable::standard()?;
//! let qr = generate(&table, b"HELLO", ECLevel::L)?;
//!
//! assert_eq!(*qr.version(), 1);
//! assert_eq!(qr.width(), 21);
//! assert_eq!(*qr.mask(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrgen::{CapacityTable, ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = CapacityTable::standard()?;
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .version(Version::new(2)?)    // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)         // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)   // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build(&table)?;
//!
//! println!("{}", qr.metadata());
//! let img = qr.render(4);  // 4 pixels per module
//! assert_eq!(img.dimensions(), (132, 132));
//! # Ok(())
//! # }
//! ```
//!
//! ### Non UTF-8 Text
//!
//! ```rust
//! use qrgen::{encode_text, generate, CapacityTable, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = CapacityTable::standard()?;
//! let bytes = encode_text("Grüße", "ISO-8859-1")?;
//! assert_eq!(bytes.len(), 5);
//! let qr = generate(&table, &bytes, ECLevel::M)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - **Normal QR**: Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Masks
//! Eight masks are evaluated against four penalty rules: runs of five or more same colored
//! modules, uniform 2x2 blocks, light modules outside finder like sequences and the dark to
//! light balance. The
//! lowest total wins, ties going to the lowest mask id.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{generate, QRBuilder, QR};
pub use common::codec::encode_text;
pub use common::error::{QRError, QRResult};
pub use common::mask::{MaskPattern, Penalty};
pub use common::metadata::{Color, ECLevel, Version};
pub use common::version_db::{BlockSchema, CapacityTable};
