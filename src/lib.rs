//! # rise-convert
//!
//! Batch-convert Jupyter notebook templates into finished RISE slideshows.
//!
//! A manifest lists one path per line. Each entry is handled by name:
//!
//! - `*.tpl.ipynb` templates are exported (prompts stripped, tagged cells
//!   removed), given RISE slide options and written as `*.ipynb`
//! - in Daytum mode, paths containing `datasets` are skipped
//! - everything else is copied verbatim
//!
//! ## Quick Start
//!
//! ```no_run
//! use rise_convert::{Converter, ExportConfig, Options};
//!
//! let options = Options::new("files_to_convert.txt")
//!     .with_output_dir("build")
//!     .with_daytum(true);
//! let config = ExportConfig::for_mode(options.daytum);
//!
//! let summary = Converter::new(options, &config).run()?;
//! println!("{} notebooks exported", summary.exported);
//! # Ok::<(), rise_convert::Error>(())
//! ```

pub mod classify;
pub mod convert;
pub mod copy;
pub mod error;
pub mod export;
pub mod manifest;
pub mod notebook;
pub mod options;
pub mod rise;

pub use classify::{FileKind, classify, output_name, output_stem};
pub use convert::{Converter, Summary};
pub use error::{Error, Result};
pub use export::{Exporter, NotebookExporter, Resources};
pub use manifest::Manifest;
pub use notebook::{Cell, CellType, Notebook};
pub use options::{ExportConfig, Options};
pub use rise::{SlideOptions, add_rise_options};
