#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod clock;
pub mod error;
pub mod files;
pub mod i18n;
pub mod links;
pub mod model;
pub mod new;
pub mod site;
pub mod theme;

pub use crate::clock::Clock;
pub use crate::clock::FixedClock;
pub use crate::clock::SystemClock;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::model::Config;
pub use crate::new::create_new_project;
pub use crate::site::BuildSummary;
pub use crate::site::build;
pub use crate::site::clean;
