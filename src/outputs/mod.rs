//! Output generation for collected records.
//!
//! # Submodules
//!
//! - [`text`]: Writes an `ExtractedRecord` as a flat text file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── hacker_news_data.txt
//! ├── ntv_news_data.txt
//! └── hurriyet_data.txt
//! ```

pub mod text;
