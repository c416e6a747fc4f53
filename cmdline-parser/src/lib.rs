//! # cmdline-parser
//!
//! Token model for single-line kernel boot parameter files such as the Raspberry Pi's
//! `/boot/cmdline.txt`.
//!
//! A command line is a whitespace separated sequence of tokens, each either a bare atom
//! (`rootwait`) or a key with a comma separated value list (`console=serial0,115200`).
//! [`KernelParamList`](cmdline::KernelParamList) parses such a line, inserts or merges
//! parameters relative to existing keys, and serializes it back.
//!
//!     let mut params = KernelParamList::parse("console=tty1 rootwait");
//!     params.add_param("modules-load", Some(vec!["dwc2".into()]), None, Some("rootwait"), true);
//!     assert_eq!(params.to_string(), "console=tty1 rootwait modules-load=dwc2");

pub mod cmdline;

pub use cmdline::{KernelParamList, Param, ParamValue};
