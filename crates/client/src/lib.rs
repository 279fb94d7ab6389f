//! Document acquisition for ragdocs.
//!
//! Downloads remote documents into the local cache with conditional
//! revalidation, scans local directories for text files, and resolves mixed
//! locator lists into one ordered set of local paths.

pub mod fetch;
pub mod process;
pub mod scan;

pub use fetch::{DocumentFetcher, Downloader, FetchConfig};
pub use process::DocumentSetProcessor;
pub use scan::{ScanIter, TEXT_EXTENSIONS, is_text_file, scan_directory, scan_file, walk};
