//! File I/O for mergestudio.
//!
//! This module handles:
//! - Loading PDF documents and checking inputs
//! - Loading the first worksheet of xlsx/xls workbooks as tables
//! - Writing merged outputs through staged files, so a failed write never
//!   leaves a half-written destination

pub mod reader;
pub mod sheet;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader, check_input};
pub use sheet::{read_first_sheet, write_table};
pub use writer::{PdfWriter, StagedFile, WriteStatistics};
