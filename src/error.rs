// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types for the `soc_device_tree` crate.

use core::fmt;

/// An error that can occur while assembling a system graph.
///
/// Translation itself never fails: once a [`Netlist`](crate::system::Netlist)
/// is built, resolution and synthesis degrade anomalies to diagnostics.
/// Only the graph mutation API reports errors.
#[derive(Debug)]
#[non_exhaustive]
pub enum GraphError {
    /// A component with the same instance name already exists.
    DuplicateComponent(String),
    /// The named component does not exist in the netlist.
    UnknownComponent(String),
    /// The named interface does not exist on the component.
    UnknownInterface {
        /// Instance name of the component that was searched.
        component: String,
        /// Name of the missing interface.
        interface: String,
    },
    /// Both sides of a connection belong to the same component.
    SelfConnection(String),
    /// The master side of a connection is not a master interface.
    ExpectedMaster {
        /// Instance name of the offending component.
        component: String,
        /// Name of the offending interface.
        interface: String,
    },
    /// The slave side of a connection is not a slave interface.
    ExpectedSlave {
        /// Instance name of the offending component.
        component: String,
        /// Name of the offending interface.
        interface: String,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateComponent(name) => {
                write!(f, "duplicate component instance \"{name}\"")
            }
            GraphError::UnknownComponent(name) => write!(f, "unknown component \"{name}\""),
            GraphError::UnknownInterface {
                component,
                interface,
            } => {
                write!(f, "component \"{component}\" has no interface \"{interface}\"")
            }
            GraphError::SelfConnection(name) => {
                write!(f, "component \"{name}\" cannot be connected to itself")
            }
            GraphError::ExpectedMaster {
                component,
                interface,
            } => {
                write!(f, "interface \"{component}.{interface}\" is not a master interface")
            }
            GraphError::ExpectedSlave {
                component,
                interface,
            } => {
                write!(f, "interface \"{component}.{interface}\" is not a slave interface")
            }
        }
    }
}

impl core::error::Error for GraphError {}
