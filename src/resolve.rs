// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Graph-walking resolution of register addresses, interrupt parents, and
//! clock rates.
//!
//! All three resolvers are total over a well-formed graph: ambiguity and
//! missing data degrade to a diagnostic plus a best-effort result
//! (first-found wins, or empty/zero), never an error.

use crate::board::BoardConfig;
use crate::diag::{Diagnostic, DiagnosticSink};
use crate::system::{Component, ConnectionId, Interface, Netlist};

/// The outcome of register-address resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegisters {
    words: Vec<u32>,
    cells_per_row: usize,
    base: Option<Vec<u32>>,
}

impl ResolvedRegisters {
    /// Returns the resolved register words: for each reachable memory-slave
    /// interface, its address words followed by its declared size words.
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Returns how many words form one register row, derived from the slave
    /// interface of the parent connection (2 when there is none).
    #[must_use]
    pub fn cells_per_row(&self) -> usize {
        self.cells_per_row
    }

    /// Returns the address words of the first selected connection, the base
    /// address that names the node.
    #[must_use]
    pub fn base(&self) -> Option<&[u32]> {
        self.base.as_deref()
    }

    /// Whether no register was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The outcome of interrupt-parent resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterrupts {
    parent: Option<String>,
    values: Vec<u32>,
}

impl ResolvedInterrupts {
    /// Returns the instance name of the resolved interrupt parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns the irq line values routed to the resolved parent, in
    /// interface-then-connection order.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }
}

/// Resolves the register addresses of `component` as seen from the master
/// side of its parent connection.
///
/// For every memory-slave interface: with a parent connection, the one
/// connection whose master component matches the parent connection's master
/// is selected; with no parent connection, an interface contributes only
/// when it has exactly one connection. A component with no reachable
/// memory-slave interface resolves to an empty word sequence.
#[must_use]
pub fn resolve_registers(
    netlist: &Netlist,
    component: &Component,
    parent: Option<ConnectionId>,
) -> ResolvedRegisters {
    let parent_connection = parent.map(|id| netlist.connection(id));
    let parent_master = parent_connection.map(|connection| connection.master().component());

    let mut words = Vec::new();
    let mut base = None;
    for interface in component.interfaces() {
        if !interface.is_memory_slave() {
            continue;
        }
        let selected = match parent_master {
            Some(master) => interface
                .connections()
                .map(|id| netlist.connection(id))
                .find(|connection| connection.master().component() == master),
            None => {
                let mut connections = interface.connections();
                match (connections.next(), connections.next()) {
                    (Some(id), None) => Some(netlist.connection(id)),
                    _ => None,
                }
            }
        };
        let Some(connection) = selected else {
            continue;
        };
        if base.is_none() {
            base = Some(connection.value().to_vec());
        }
        words.extend_from_slice(connection.value());
        words.extend_from_slice(interface.size());
    }

    let cells_per_row = parent_connection
        .and_then(|connection| netlist.endpoint_interface(connection.slave()))
        .map_or(2, |interface| {
            interface.primary_width() + interface.secondary_width()
        })
        .max(1);

    ResolvedRegisters {
        words,
        cells_per_row,
        base,
    }
}

/// Resolves the interrupt parent of `component` and the irq line values
/// routed to it.
///
/// At most one interrupt parent is supported per interface and per
/// component. Additional distinct candidates are reported as warnings and
/// dropped; the first one found wins (connection order within an interface,
/// interface order across the component). The irq values of a losing parent
/// are never merged into the result.
#[must_use]
pub fn resolve_interrupts(
    netlist: &Netlist,
    component: &Component,
    board: &BoardConfig,
    diag: &dyn DiagnosticSink,
) -> ResolvedInterrupts {
    let mut parent: Option<&str> = None;
    let mut values = Vec::new();

    for interface in component.interfaces() {
        if !interface.is_irq_slave() {
            continue;
        }
        let Some(interface_parent) = interrupt_parent(netlist, component, interface, board, diag)
        else {
            continue;
        };
        match parent {
            None => parent = Some(interface_parent),
            Some(existing) if existing != interface_parent => {
                diag.report(Diagnostic::warning(format!(
                    "{}: multiple interrupt parents per component are not supported, keeping {existing}",
                    component.instance_name(),
                )));
            }
            Some(_) => {}
        }
        if let Some(fixed) = parent {
            for id in interface.connections() {
                let connection = netlist.connection(id);
                if connection.master().component() == fixed {
                    values.extend_from_slice(connection.value());
                }
            }
        }
    }

    ResolvedInterrupts {
        parent: parent.map(str::to_owned),
        values,
    }
}

/// Finds the interrupt parent of one interrupt-slave interface: the first
/// connected master the board recognizes as a valid interrupt router.
fn interrupt_parent<'a>(
    netlist: &'a Netlist,
    component: &Component,
    interface: &Interface,
    board: &BoardConfig,
    diag: &dyn DiagnosticSink,
) -> Option<&'a str> {
    let mut parent: Option<&Component> = None;
    for id in interface.connections() {
        let connection = netlist.connection(id);
        let Some(master) = netlist.component(connection.master().component()) else {
            continue;
        };
        if !board.is_valid_irq_master(master) {
            continue;
        }
        match parent {
            None => parent = Some(master),
            Some(existing) if existing.instance_name() != master.instance_name() => {
                diag.report(Diagnostic::warning(format!(
                    "{}.{}: multiple interrupt parents per irq port are not supported, keeping {} and dropping {} (class {})",
                    component.instance_name(),
                    interface.name(),
                    existing.instance_name(),
                    master.instance_name(),
                    master.class_name(),
                )));
            }
            Some(_) => {}
        }
    }
    parent.map(Component::instance_name)
}

/// Resolves the clock rate of `component` in Hz.
///
/// Each clock-slave interface contributes the value of its first connection,
/// read most-significant word first; the last interface with a usable
/// connection wins. An interface with no connection, or an empty connection
/// value, leaves the rate untouched and is reported at debug severity. A
/// component with no clock-slave interface resolves to 0.
#[must_use]
pub fn resolve_clock_rate(
    netlist: &Netlist,
    component: &Component,
    diag: &dyn DiagnosticSink,
) -> u64 {
    let mut rate = 0;
    for interface in component.interfaces() {
        if !interface.is_clock_slave() {
            continue;
        }
        let value = interface
            .connections()
            .next()
            .map(|id| netlist.connection(id).value());
        match value.and_then(words_to_u64) {
            Some(resolved) => rate = resolved,
            None => diag.report(Diagnostic::debug(format!(
                "{}.{}: no usable clock connection",
                component.instance_name(),
                interface.name(),
            ))),
        }
    }
    rate
}

/// Folds 32-bit words into one integer, most-significant word first.
fn words_to_u64(words: &[u32]) -> Option<u64> {
    if words.is_empty() {
        return None;
    }
    Some(
        words
            .iter()
            .fold(0u64, |accumulator, word| (accumulator << 32) | u64::from(*word)),
    )
}
