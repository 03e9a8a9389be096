//! Support library for the `bgputil` CLI tool.
#![doc(html_root_url = "https://docs.rs/bgputil-cli/0.1.0")]

mod cli;
pub use self::cli::main;

mod io;
mod pipeline;
