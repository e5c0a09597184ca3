//! # nevra
//!
//! A library for working with RPM package identities: the name, epoch, version, release and
//! architecture ("NEVRA") of a package.
//!
//! It provides
//!
//! * the `rpmvercmp` version comparison, see [`compare_version_string`]
//! * a [`Nevra`] value type ordered on top of it (see [`Nevra::cmp_normalized`] for sorting)
//! * parsing and formatting of the usual string forms (`nvr`, `nvra`, `nevra`, ...)
//! * selection of the newest packages out of a collection, and glob based filtering
//!
//! # Example
//!
//! ```rust
//! use nevra::{Nevra, NevraFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let old = Nevra::parse_nvra("bash-5.2.15-1.fc38.x86_64")?;
//! let new = Nevra::parse_nevra("bash-0:5.2.26-3.fc40.x86_64")?;
//! assert!(old < new);
//! assert_eq!(new.format(NevraFormat::UiNevra), "bash-5.2.26-3.fc40.x86_64");
//!
//! let pkgs = [old, new, Nevra::parse_nvra("bash-5.2.26-3.fc40.i686")?];
//! let newest = nevra::newest_by_name_arch(&pkgs, false);
//! assert_eq!(newest.len(), 2);
//!
//! let matching = nevra::filter_by_pattern(&pkgs, &["bash-5.2.2*"]);
//! assert_eq!(matching.len(), 2);
//! # Ok(())
//! # }
//! ```

#![allow(unknown_lints, clippy::uninlined_format_args)]

mod errors;
pub use crate::errors::*;

mod version;
pub use crate::version::*;

mod nevra;
pub use crate::nevra::*;

mod format;
pub use crate::format::*;

mod select;
pub use crate::select::*;
