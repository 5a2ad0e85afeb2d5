// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A library for translating FPGA soft-SoC netlists into device tree nodes.
//!
//! Hand-writing device-tree source for a soft SoC is tedious and
//! error-prone: every change to the hardware design moves base addresses and
//! irq lines around. This library takes the parsed form of a hardware-system
//! description (components, their memory/interrupt/clock interfaces, and
//! the point-to-point connections between them) and produces the matching
//! device-tree node hierarchy.
//!
//! The pieces:
//!
//! - [`system`] holds the hardware graph: a [`Netlist`](system::Netlist) of
//!   [`Component`](system::Component)s connected through typed
//!   [`Interface`](system::Interface)s.
//! - [`catalog`] supplies per-component-class translation rules (compatible
//!   strings, parameter mappings, the vendor prefix). Lookup misses fall
//!   back to a stub entry, so translation always produces a node.
//! - [`resolve`] walks the graph to compute register addresses, interrupt
//!   parents, and clock rates for one component.
//! - [`synth`] combines the resolved data with the catalog rules into
//!   [`DtNode`](model::DtNode)s.
//! - [`diag`] carries the warnings a translation pass can produce; sinks are
//!   passed in explicitly, so tests can assert on emissions.
//!
//! Parsing the netlist file format and serializing the node tree to `.dts`
//! or `.dtb` are out of scope; the node model is the interchange point.
//!
//! # Examples
//!
//! ```
//! use soc_device_tree::board::BoardConfig;
//! use soc_device_tree::catalog::CatalogEntry;
//! use soc_device_tree::diag::CollectingSink;
//! use soc_device_tree::synth::synthesize_node;
//! use soc_device_tree::system::{Component, Endpoint, Interface, InterfaceKind, Netlist};
//!
//! let mut netlist = Netlist::new();
//! netlist
//!     .add_component(
//!         Component::new("cpu_0", "nios2", "1.0", CatalogEntry::new("cpu", "altr"))
//!             .with_interface(Interface::new("data_master", InterfaceKind::Memory, true)),
//!     )
//!     .unwrap();
//! netlist
//!     .add_component(
//!         Component::new(
//!             "uart_0",
//!             "uart",
//!             "1.0",
//!             CatalogEntry::new("serial", "altr").with_compatible("altr,uart-{version}"),
//!         )
//!         .with_interface(
//!             Interface::new("s1", InterfaceKind::Memory, false)
//!                 .with_widths(1, 1)
//!                 .with_size([0x20]),
//!         ),
//!     )
//!     .unwrap();
//! let connection = netlist
//!     .connect(
//!         Endpoint::new("cpu_0", "data_master"),
//!         Endpoint::new("uart_0", "s1"),
//!         [0x1000],
//!     )
//!     .unwrap();
//!
//! let sink = CollectingSink::new();
//! let uart = netlist.component("uart_0").unwrap();
//! let node = synthesize_node(&netlist, uart, Some(connection), &BoardConfig::new(), &sink);
//!
//! assert_eq!(node.name(), "serial@0x1000");
//! assert_eq!(node.label(), Some("uart_0"));
//! assert_eq!(
//!     node.property("compatible").unwrap().as_strings(),
//!     Some(&["altr,uart-1.0".to_owned()][..]),
//! );
//! assert_eq!(
//!     node.property("reg").unwrap().as_hex(),
//!     Some((&[0x1000, 0x20][..], 2)),
//! );
//! ```

#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod board;
pub mod catalog;
pub mod diag;
pub mod error;
pub mod model;
pub mod resolve;
pub mod synth;
pub mod system;
