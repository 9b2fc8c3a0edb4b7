//! # sbgnq-io
//!
//! The I/O boundary: reading CellDesigner/SBGN-ML diagrams into a
//! [`sbgnq_core::Model`], and writing a compiled model out as SBML-Qual,
//! SIF, CSV, BoolNet or BMA-JSON.
//!
//! Nothing in here carries compilation logic; that lives in
//! `sbgnq-compile`. A writer only ever reads what the pipeline already
//! attached to each species (`function`, `fixed_value`, `public_name`,
//! `export_id`).

pub mod error;
pub mod names;
pub mod overrides_file;
pub mod reader;
pub mod vocab;
pub mod writers;

pub use error::{IoError, Result};
pub use names::{display_name, export_id, named_influences};
pub use overrides_file::read_overrides;
pub use reader::{read_reader, read_str};
pub use writers::{write_bma, write_bnet, write_csv, write_sbml_qual, write_sif, BmaWriterConfig};
