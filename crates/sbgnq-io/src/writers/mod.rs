//! Output formats. Each submodule takes an already-compiled
//! [`sbgnq_core::Model`] (and, where relevant, the influence graph the
//! Abstracter derived) and renders it to an `impl std::io::Write`.

pub mod bma;
pub mod bnet;
pub mod csv_writer;
pub mod sbml_qual;
pub mod sif;

pub use bma::{BmaWriterConfig, write as write_bma};
pub use bnet::write as write_bnet;
pub use csv_writer::write as write_csv;
pub use sbml_qual::write as write_sbml_qual;
pub use sif::write as write_sif;
