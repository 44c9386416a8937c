//! # stamp_data
//!
//! Data file handling for cfstamp.
//!
//! A data file is a JSON object of string values. Three keys identify the
//! stack (`CF_TEMPLATE`, `STACK_NAME`, `STACK_REGION`); every other key is a
//! substitution value for the template. An optional `IMPORT` key pulls in
//! further data files whose values are merged underneath the importing file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use stamp_data::DataFileValidator;
//!
//! let (data, report) = DataFileValidator::load("stacks/web_us-west-2.json").unwrap();
//! println!("Stack {} in {}", data.stack_name(), data.stack_region());
//! for warning in &report.warnings {
//!     println!("warning: {}", warning);
//! }
//! ```

pub mod error;
pub mod models;
pub mod reader;
pub mod scaffold;
pub mod validator;

pub use error::{DataError, DataResult};
pub use models::{DataFile, CF_TEMPLATE, IMPORT, REQUIRED_KEYS, STACK_NAME, STACK_REGION};
pub use reader::DataFileReader;
pub use scaffold::DataFileScaffold;
pub use validator::{DataFileValidator, ValidationReport};
