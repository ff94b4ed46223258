#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

//! `SQLite` Page Reader - A pure Rust decoder for the `SQLite` file format
//!
//! This library decodes the 100-byte file header and individual B-tree pages:
//! the page header, the cell pointer array, and leaf table cells down to the
//! typed column values of each record. Every decoder takes a byte slice and
//! returns an owned value or a typed [`Error`]; nothing panics on bad input.
//!
//! # Example
//!
//! ```no_run
//! use sqlite_page_reader::{Database, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let mut db = Database::open("example.db")?;
//!
//!     let info = db.info()?;
//!     println!("database page size: {}", info.page_size);
//!     println!("number of tables: {}", info.table_count);
//!
//!     for table in db.tables()? {
//!         println!("Table: {}", table);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Decoding from memory needs no file at all:
//!
//! ```no_run
//! # fn main() -> Result<(), sqlite_page_reader::Error> {
//! let bytes = std::fs::read("example.db")?;
//! let page = sqlite_page_reader::load_first_page(&bytes)?;
//! for row in page.schema_rows() {
//!     println!("{} {} (root page {})", row.object_type, row.name, row.root_page);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod format;
pub mod logging;
pub mod page;
pub mod record;
pub mod serial_type;
pub mod value;
pub mod varint;

pub use config::ReaderConfig;
pub use database::{Database, DbInfo, load_first_page, load_page};
pub use error::{Error, Result};
pub use logging::{
    LogLevel, init_default_logger, init_from_env, init_logger, log_debug, log_error, log_info,
    log_trace, log_warn, set_log_level,
};
pub use value::Value;

// Re-export commonly used types
pub use format::{FileHeader, PageType};
pub use page::{Page, PageHeader, decode_page};
pub use record::{Cell, ChildPointer, Column, Record, SchemaRow};
pub use serial_type::SerialType;
pub use varint::{decode_varint, decode_varint32, encode_varint};
