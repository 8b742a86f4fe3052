//! Merge several CSV files into one, in a chosen order.
//!
//! Each file is parsed, optionally stripped of `*_Confidence` columns, has
//! its `*_X` / `*_Y` / `*_Z` joint columns rounded to nullable integers, and
//! is then appended to the combined table. The result is serialized as
//! `combined.csv`.
//!
//! ```no_run
//! use csv_joiner::{merge, InputFile, MergeOptions, MergeOrder};
//!
//! let files = vec![
//!     InputFile::new("a.csv", "Name,Hip_X\na,1.6\n"),
//!     InputFile::new("b.csv", "Name,Hip_X\nb,2.5\n"),
//! ];
//! let order = MergeOrder::from_sequence(&["b.csv", "a.csv"], &["a.csv", "b.csv"])?;
//! let out = merge(&files, &order, &MergeOptions::default())?;
//! assert_eq!(out.bytes, b"Name,Hip_X\nb,2\na,2\n");
//! # Ok::<(), csv_joiner::MergeError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod merge;
pub mod order;
pub mod state;

pub use config::{MergeOptions, RoundingMode};
pub use data::loader::parse_table;
pub use data::model::{InputFile, Table, Value};
pub use data::transform::transform;
pub use data::writer::write_table;
pub use error::{MergeError, MergeResult};
pub use merge::{combine, merge, MergeOutput};
pub use order::MergeOrder;
pub use state::{reconcile, SessionState};
