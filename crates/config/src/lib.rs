//! Site configuration for `vidya`.
//!
//! The configuration is plain data: it is read once from `vidya.yml`, checked with
//! [`Config::validate`], and then handed by reference to everything that builds the site.

mod config;
mod i18n;
mod link;
mod policy;
mod preset;
mod theme;
mod validate;

pub use self::config::*;
pub use self::i18n::*;
pub use self::link::*;
pub use self::policy::*;
pub use self::preset::*;
pub use self::theme::*;
pub use self::validate::*;

pub use relative_path::RelativePath as RelPath;
pub use relative_path::RelativePathBuf as RelPathBuf;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
