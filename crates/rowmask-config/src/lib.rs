//! File-based masking configuration for RowMask
//!
//! Loads the masking configuration document from a YAML or JSON file,
//! validates it, and compiles it into engine rules.
//!
//! # Example
//! ```no_run
//! # use rowmask_config::MaskConfig;
//! # fn example() -> rowmask_core::Result<()> {
//! let config = MaskConfig::load("mask.yaml")?;
//! let rules = config.compile()?;
//! # Ok(())
//! # }
//! ```

mod file_config;

pub use file_config::MaskConfig;
