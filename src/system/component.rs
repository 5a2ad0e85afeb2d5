// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use indexmap::IndexMap;
use twox_hash::xxhash64;

use super::interface::{Interface, InterfaceKind};
use super::parameter::Parameter;
use crate::catalog::{CatalogEntry, ComponentCatalog};

/// One instantiated hardware IP core in the system graph.
///
/// A component owns its interfaces outright; cloning a component (or a whole
/// netlist) clones the interface collection, so copies never share state.
#[derive(Debug, Clone)]
pub struct Component {
    instance_name: String,
    class_name: String,
    version: String,
    entry: CatalogEntry,
    interfaces: IndexMap<String, Interface, xxhash64::State>,
    parameters: Vec<Parameter>,
}

impl Component {
    /// Creates a component with an already-resolved catalog entry.
    #[must_use]
    pub fn new(
        instance_name: impl Into<String>,
        class_name: impl Into<String>,
        version: impl Into<String>,
        entry: CatalogEntry,
    ) -> Self {
        Self {
            instance_name: instance_name.into(),
            class_name: class_name.into(),
            version: version.into(),
            entry,
            interfaces: IndexMap::with_hasher(xxhash64::State::with_seed(0xdead_cafe)),
            parameters: Vec::new(),
        }
    }

    /// Creates a component, resolving its catalog entry by class name.
    #[must_use]
    pub fn from_catalog(
        instance_name: impl Into<String>,
        class_name: impl Into<String>,
        version: impl Into<String>,
        catalog: &impl ComponentCatalog,
    ) -> Self {
        let class_name = class_name.into();
        let entry = catalog.lookup(&class_name);
        Self::new(instance_name, class_name, version, entry)
    }

    /// Returns the unique instance name.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Returns the component class name (the catalog key).
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the component version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the resolved catalog entry.
    #[must_use]
    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    /// Adds an interface. Interface names are unique within a component; an
    /// existing interface of the same name is replaced.
    pub fn add_interface(&mut self, interface: Interface) {
        self.interfaces
            .insert(interface.name().to_owned(), interface);
    }

    /// Adds an interface, builder style.
    #[must_use]
    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.add_interface(interface);
        self
    }

    /// Adds a parameter. Parameter order is preserved.
    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.add_parameter(parameter);
        self
    }

    /// Returns the interfaces in declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.values()
    }

    /// Finds an interface by name.
    #[must_use]
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }

    pub(crate) fn interface_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.get_mut(name)
    }

    pub(crate) fn remove_interface_raw(&mut self, name: &str) -> Option<Interface> {
        self.interfaces.shift_remove(name)
    }

    /// Returns the interfaces matching the given filters, in declaration
    /// order. A `None` filter matches everything.
    pub fn interfaces_matching(
        &self,
        kind: Option<InterfaceKind>,
        is_master: Option<bool>,
    ) -> impl Iterator<Item = &Interface> {
        self.interfaces.values().filter(move |interface| {
            kind.is_none_or(|kind| interface.kind() == kind)
                && is_master.is_none_or(|is_master| interface.is_master() == is_master)
        })
    }

    /// Whether this component can route interrupts for others.
    #[must_use]
    pub fn is_interrupt_master(&self) -> bool {
        self.interfaces().any(Interface::is_irq_master)
    }

    /// Whether this component issues memory-mapped accesses.
    #[must_use]
    pub fn has_memory_master(&self) -> bool {
        self.interfaces().any(Interface::is_memory_master)
    }

    /// Returns the parameters in netlist order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Finds a parameter by exact name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name() == name)
    }
}
