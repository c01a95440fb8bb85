//! Applications mounted by the dispatch graph.
//!
//! Both pieces stand in for collaborators the dispatch layer treats as opaque:
//! a service catalog and a static file wrapper. Each instance is built
//! independently; the secured and unsecured graphs share nothing.

pub mod catalog;
pub mod static_files;

pub use catalog::Catalog;
pub use static_files::SharedData;
