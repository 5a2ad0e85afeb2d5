// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The in-memory hardware-system graph.
//!
//! A [`Netlist`] owns every [`Component`] in an insertion-ordered map keyed
//! by instance name, plus an append-only arena of [`Connection`]s addressed
//! by [`ConnectionId`]. All cross-references run through stable keys (a
//! connection side is an [`Endpoint`] naming a component and one of its
//! interfaces), so the graph has no cyclic ownership and no aliased interior
//! mutability.
//!
//! This module only provides construction and traversal; the walking
//! algorithms live in [`resolve`](crate::resolve).

mod component;
mod connection;
mod interface;
mod parameter;

pub use component::Component;
pub use connection::{Connection, ConnectionId, Endpoint};
pub use interface::{Interface, InterfaceKind};
pub use parameter::Parameter;

pub(crate) use parameter::{inferred_value, parse_number};

use indexmap::IndexMap;
use twox_hash::xxhash64;

use crate::error::GraphError;

/// A parsed hardware system: components, their interfaces, and the
/// connections between them.
///
/// The netlist is mutable during construction and frozen for the duration of
/// a translation pass; nothing in [`resolve`](crate::resolve) or
/// [`synth`](crate::synth) takes `&mut Netlist`.
///
/// # Examples
///
/// ```
/// use soc_device_tree::catalog::CatalogEntry;
/// use soc_device_tree::system::{Component, Endpoint, Interface, InterfaceKind, Netlist};
///
/// let mut netlist = Netlist::new();
/// netlist
///     .add_component(
///         Component::new("cpu_0", "nios2", "1.0", CatalogEntry::new("cpu", "altr"))
///             .with_interface(Interface::new("data_master", InterfaceKind::Memory, true)),
///     )
///     .unwrap();
/// netlist
///     .add_component(
///         Component::new("onchip_mem", "ram", "1.0", CatalogEntry::new("memory", "altr"))
///             .with_interface(Interface::new("s1", InterfaceKind::Memory, false)),
///     )
///     .unwrap();
///
/// let id = netlist
///     .connect(
///         Endpoint::new("cpu_0", "data_master"),
///         Endpoint::new("onchip_mem", "s1"),
///         [0x4000],
///     )
///     .unwrap();
/// assert_eq!(netlist.connection(id).value(), [0x4000]);
/// ```
#[derive(Debug, Clone)]
pub struct Netlist {
    components: IndexMap<String, Component, xxhash64::State>,
    connections: Vec<Connection>,
}

impl Default for Netlist {
    fn default() -> Self {
        Self {
            components: IndexMap::with_hasher(xxhash64::State::with_seed(0xdead_cafe)),
            connections: Vec::new(),
        }
    }
}

impl Netlist {
    /// Creates an empty netlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateComponent`] when a component with the
    /// same instance name already exists.
    pub fn add_component(&mut self, component: Component) -> Result<(), GraphError> {
        let name = component.instance_name().to_owned();
        if self.components.contains_key(&name) {
            return Err(GraphError::DuplicateComponent(name));
        }
        self.components.insert(name, component);
        Ok(())
    }

    /// Finds a component by instance name.
    #[must_use]
    pub fn component(&self, instance_name: &str) -> Option<&Component> {
        self.components.get(instance_name)
    }

    /// Finds a component by instance name and returns a mutable reference.
    #[must_use]
    pub fn component_mut(&mut self, instance_name: &str) -> Option<&mut Component> {
        self.components.get_mut(instance_name)
    }

    /// Returns the components in netlist order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Connects a master interface to a slave interface, carrying the given
    /// data words, and registers the new edge on both interfaces.
    ///
    /// # Errors
    ///
    /// Returns an error when either endpoint does not exist, when both sides
    /// belong to the same component, or when the mastership of either side
    /// does not match its role.
    pub fn connect(
        &mut self,
        master: Endpoint,
        slave: Endpoint,
        value: impl Into<Vec<u32>>,
    ) -> Result<ConnectionId, GraphError> {
        if master.component() == slave.component() {
            return Err(GraphError::SelfConnection(master.component().to_owned()));
        }
        if !self.endpoint_interface_checked(&master)?.is_master() {
            return Err(GraphError::ExpectedMaster {
                component: master.component().to_owned(),
                interface: master.interface().to_owned(),
            });
        }
        if self.endpoint_interface_checked(&slave)?.is_master() {
            return Err(GraphError::ExpectedSlave {
                component: slave.component().to_owned(),
                interface: slave.interface().to_owned(),
            });
        }

        let id = ConnectionId(self.connections.len());
        self.connections
            .push(Connection::new(master.clone(), slave.clone(), value.into()));
        self.attach(&master, id);
        self.attach(&slave, id);
        Ok(id)
    }

    /// Fetches a connection by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this netlist.
    #[must_use]
    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id.0]
    }

    /// Resolves an endpoint to its interface, if the component and interface
    /// still exist.
    #[must_use]
    pub fn endpoint_interface(&self, endpoint: &Endpoint) -> Option<&Interface> {
        self.component(endpoint.component())?
            .interface(endpoint.interface())
    }

    /// Removes an interface from a component, detaching every connection
    /// that touches it from the peer interface as well. The detached edges
    /// stay in the arena but become unreachable from traversal.
    ///
    /// # Errors
    ///
    /// Returns an error when the component or interface does not exist.
    pub fn remove_interface(&mut self, component: &str, interface: &str) -> Result<(), GraphError> {
        let removed = self
            .component_mut(component)
            .ok_or_else(|| GraphError::UnknownComponent(component.to_owned()))?
            .remove_interface_raw(interface)
            .ok_or_else(|| GraphError::UnknownInterface {
                component: component.to_owned(),
                interface: interface.to_owned(),
            })?;

        for id in removed.connections() {
            let connection = &self.connections[id.0];
            let peer = if connection.master().component() == component
                && connection.master().interface() == interface
            {
                connection.slave().clone()
            } else {
                connection.master().clone()
            };
            if let Some(peer_interface) = self
                .component_mut(peer.component())
                .and_then(|c| c.interface_mut(peer.interface()))
            {
                peer_interface.detach(id);
            }
        }
        Ok(())
    }

    fn endpoint_interface_checked(&self, endpoint: &Endpoint) -> Result<&Interface, GraphError> {
        let component = self
            .component(endpoint.component())
            .ok_or_else(|| GraphError::UnknownComponent(endpoint.component().to_owned()))?;
        component
            .interface(endpoint.interface())
            .ok_or_else(|| GraphError::UnknownInterface {
                component: endpoint.component().to_owned(),
                interface: endpoint.interface().to_owned(),
            })
    }

    fn attach(&mut self, endpoint: &Endpoint, id: ConnectionId) {
        if let Some(interface) = self
            .component_mut(endpoint.component())
            .and_then(|c| c.interface_mut(endpoint.interface()))
        {
            interface.attach(id);
        }
    }
}
