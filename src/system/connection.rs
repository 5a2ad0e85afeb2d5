// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Identifies a connection in a [`Netlist`](super::Netlist)'s connection
/// arena. Ids stay stable for the lifetime of the netlist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub(crate) usize);

/// One side of a connection, addressed by stable names instead of pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    component: String,
    interface: String,
}

impl Endpoint {
    /// Creates an endpoint naming one interface of one component.
    #[must_use]
    pub fn new(component: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            interface: interface.into(),
        }
    }

    /// Returns the instance name of the component.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns the interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }
}

/// A directed edge from a master interface to a slave interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    master: Endpoint,
    slave: Endpoint,
    value: Vec<u32>,
}

impl Connection {
    pub(crate) fn new(master: Endpoint, slave: Endpoint, value: Vec<u32>) -> Self {
        Self {
            master,
            slave,
            value,
        }
    }

    /// Returns the master side of this connection.
    #[must_use]
    pub fn master(&self) -> &Endpoint {
        &self.master
    }

    /// Returns the slave side of this connection.
    #[must_use]
    pub fn slave(&self) -> &Endpoint {
        &self.slave
    }

    /// Returns the data words carried by this edge: a base address for
    /// memory connections, irq line numbers for interrupt connections, a
    /// rate for clock connections. The slave interface's widths say how the
    /// words are grouped.
    #[must_use]
    pub fn value(&self) -> &[u32] {
        &self.value
    }
}
