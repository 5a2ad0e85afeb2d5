// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::ConnectionId;

/// The kind of data an interface carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterfaceKind {
    /// Memory-mapped register access.
    Memory,
    /// Interrupt routing.
    Interrupt,
    /// A clock feed.
    Clock,
    /// Anything the translation does not interpret.
    Other,
}

/// One typed port of a component, master or slave.
///
/// The role predicates ([`is_memory_slave`](Interface::is_memory_slave) and
/// friends) are derived purely from the kind and mastership, so they can
/// never disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    name: String,
    kind: InterfaceKind,
    is_master: bool,
    primary_width: usize,
    secondary_width: usize,
    size: Vec<u32>,
    connections: Vec<ConnectionId>,
}

impl Interface {
    /// Creates an interface with a primary width of 1 cell and no secondary
    /// width.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: InterfaceKind, is_master: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            is_master,
            primary_width: 1,
            secondary_width: 0,
            size: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Sets the primary (address) and secondary (size) cell widths.
    #[must_use]
    pub fn with_widths(mut self, primary: usize, secondary: usize) -> Self {
        self.primary_width = primary;
        self.secondary_width = secondary;
        self
    }

    /// Sets the declared size words, appended after the address words when
    /// registers are resolved through this interface.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<Vec<u32>>) -> Self {
        self.size = size.into();
        self
    }

    /// Returns the interface name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of data this interface carries.
    #[must_use]
    pub fn kind(&self) -> InterfaceKind {
        self.kind
    }

    /// Whether this is the master side of its connections.
    #[must_use]
    pub fn is_master(&self) -> bool {
        self.is_master
    }

    /// Returns the primary (address) cell width.
    #[must_use]
    pub fn primary_width(&self) -> usize {
        self.primary_width
    }

    /// Returns the secondary (size) cell width.
    #[must_use]
    pub fn secondary_width(&self) -> usize {
        self.secondary_width
    }

    /// Returns the declared size words.
    #[must_use]
    pub fn size(&self) -> &[u32] {
        &self.size
    }

    /// Returns the connections this interface participates in, in the order
    /// they were made.
    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.connections.iter().copied()
    }

    /// Whether this interface accepts memory-mapped accesses.
    #[must_use]
    pub fn is_memory_slave(&self) -> bool {
        self.kind == InterfaceKind::Memory && !self.is_master
    }

    /// Whether this interface issues memory-mapped accesses.
    #[must_use]
    pub fn is_memory_master(&self) -> bool {
        self.kind == InterfaceKind::Memory && self.is_master
    }

    /// Whether this interface raises interrupts.
    #[must_use]
    pub fn is_irq_slave(&self) -> bool {
        self.kind == InterfaceKind::Interrupt && !self.is_master
    }

    /// Whether this interface receives interrupts.
    #[must_use]
    pub fn is_irq_master(&self) -> bool {
        self.kind == InterfaceKind::Interrupt && self.is_master
    }

    /// Whether this interface consumes a clock.
    #[must_use]
    pub fn is_clock_slave(&self) -> bool {
        self.kind == InterfaceKind::Clock && !self.is_master
    }

    pub(crate) fn attach(&mut self, id: ConnectionId) {
        self.connections.push(id);
    }

    pub(crate) fn detach(&mut self, id: ConnectionId) {
        self.connections.retain(|existing| *existing != id);
    }
}
