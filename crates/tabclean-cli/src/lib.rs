//! Library side of the `tabclean` command line tool.

pub mod demo;
pub mod logging;
pub mod pipeline;
