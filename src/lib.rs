//! Convert a device slideshow program so every asset is named `NN_name`.
//!
//! The program file is parsed with [`program::Program`], asset names are
//! assigned slots by [`names::normalize_names`], and [`workflow`] writes the
//! rewritten program next to the renamed assets.
pub mod assets;
pub mod cli;
pub mod names;
pub mod program;
pub mod staging;
pub mod workflow;
