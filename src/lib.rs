//! `msapart` is a crate for splitting a multiple sequence alignment into
//! independently modeled, site-compressed partitions.
//!
//! The crate provides three main points of entry:
//!
//! - Parsing partition files, either a line at a time (via
//!   [`Partition`](crate::partition::Partition)'s [`FromStr`](std::str::FromStr)
//!   implementation) or as a whole (via [`partition::File`] and the
//!   [`Reader`]).
//! - Extracting the columns of each partition from an
//!   [`Alignment`](crate::alignment::Alignment) with
//!   [`Alignment::partition()`](crate::alignment::Alignment::partition) and
//!   [`Alignment::partition_all()`](crate::alignment::Alignment::partition_all).
//!   Every derived alignment is compressed into weighted site patterns before
//!   it is returned.
//! - Checking that an alignment's labels match a reference taxon set (for
//!   example, the leaves of a tree) with the [`consistency`] module.
//!
//! ## Partition files
//!
//! Each line of a partition file names a model, a partition, and one or more
//! inclusive, zero-based column ranges:
//!
//! ```text
//! GTR,gene1=0-99,150-199
//! WAG,gene2=100-149
//! ```
//!
//! Columns are taken in the order the ranges are written, so ranges do not
//! need to be sorted and may overlap. Every line must hold a partition: blank
//! lines are rejected.
//!
//! Below is a representative example of reading a partition file and splitting
//! an alignment with it.
//!
//! ```
//! use msapart::alignment::Alignment;
//! use msapart::partition;
//!
//! let fasta = b">human\nACGTACGTAC\n>chimp\nACGTTCGTAA\n>gorilla\nAGGTACCTAC\n";
//! let alignment = Alignment::from_fasta(&fasta[..])?;
//!
//! let data = b"GTR,gene1=0-4,8-9\nWAG,gene2=5-7\n";
//! let partitions = partition::File::from_reader(msapart::Reader::new(&data[..]))?;
//!
//! for (partition, derived) in partitions.iter().zip(alignment.partition_all(&partitions)?) {
//!     println!(
//!         "{} ({}): {} columns in {} patterns",
//!         partition.name(),
//!         partition.model_name(),
//!         derived.total_weight(),
//!         derived.length()
//!     );
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `parallel`: extract partitions concurrently with `rayon` in
//!   [`Alignment::partition_all()`](crate::alignment::Alignment::partition_all).
//! - `binaries`: build the `msapart` command line tool.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod alignment;
pub mod consistency;
pub mod partition;
pub mod reader;

pub use alignment::Alignment;
pub use partition::Partition;

pub use self::reader::Reader;
