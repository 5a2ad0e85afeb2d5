// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Device-tree node synthesis.
//!
//! [`synthesize_node`] turns one resolved component into a [`DtNode`]. It is
//! a pure function of the frozen graph, the component's catalog entry, and
//! the board configuration; anomalies degrade to diagnostics, never errors.
//! [`translate`] runs it over every component in a netlist.

use core::fmt::Write as _;

use crate::board::{BoardConfig, ParameterDump};
use crate::catalog::{AutoParam, ForceType};
use crate::diag::DiagnosticSink;
use crate::model::{DtNode, DtProperty};
use crate::resolve::{resolve_clock_rate, resolve_interrupts, resolve_registers};
use crate::system::{Component, ConnectionId, InterfaceKind, Netlist, inferred_value, parse_number};

/// Exact parameter name whose value extends the `compatible` string list.
const DTS_COMPATIBLE: &str = "embeddedsw.dts.compatible";
/// Prefix for parameters that override a device-tree property directly.
const DTS_PARAMS_PREFIX: &str = "embeddedsw.dts.params.";
/// Prefix for C-macro parameters, dumped only when the board asks for them.
const CMACRO_PREFIX: &str = "embeddedsw.CMacro";

/// Synthesizes the device-tree node for one component.
///
/// `parent` is the connection through which the component was reached when
/// walking the bus hierarchy, if any; it selects which master's view of the
/// register addresses ends up in the node. The synthesized properties are,
/// in order: `device_type` (cpu and memory groups only), `compatible`,
/// `reg`, the interrupt properties, the catalog's auto-param rules, and
/// finally the remaining netlist parameters.
#[must_use]
pub fn synthesize_node(
    netlist: &Netlist,
    component: &Component,
    parent: Option<ConnectionId>,
    board: &BoardConfig,
    diag: &dyn DiagnosticSink,
) -> DtNode {
    let entry = component.entry();
    let registers = resolve_registers(netlist, component, parent);

    let name = match registers.base() {
        Some(address) => format!("{}@0x{}", entry.group(), address_suffix(address)),
        None => entry.group().to_owned(),
    };
    let mut node = DtNode::new(name);
    node.set_label(component.instance_name());

    if entry.group().eq_ignore_ascii_case("cpu") || entry.group().eq_ignore_ascii_case("memory") {
        node.add_property(DtProperty::strings("device_type", [entry.group()]));
    }
    node.add_property(DtProperty::strings(
        "compatible",
        entry.compatibles(component.version()),
    ));

    if !registers.is_empty() {
        node.add_property(DtProperty::hex(
            "reg",
            widen(registers.words()),
            registers.cells_per_row(),
        ));
    }

    let interrupts = resolve_interrupts(netlist, component, board, diag);
    if let Some(parent_name) = interrupts.parent() {
        node.add_property(DtProperty::phandle("interrupt-parent", parent_name));
        node.add_property(DtProperty::numbers("interrupts", widen(interrupts.values())));
    }
    if component.is_interrupt_master() {
        node.add_property(DtProperty::flag("interrupt-controller"));
        let cells = component
            .interfaces_matching(Some(InterfaceKind::Interrupt), Some(true))
            .next()
            .map_or(0, |interface| interface.primary_width() as u64);
        node.add_property(DtProperty::numbers("#interrupt-cells", [cells]));
    }

    let clock_rate = resolve_clock_rate(netlist, component, diag);

    // Pool of literal parameters; each is consumed at most once.
    let mut consumed = vec![false; component.parameters().len()];

    for rule in entry.auto_params() {
        let matched = component
            .parameters()
            .iter()
            .enumerate()
            .find(|(index, parameter)| {
                !consumed[*index] && parameter.name() == rule.source_name()
            });
        if let Some((index, parameter)) = matched {
            node.add_property(parameter.to_dt_property(rule.target_name(), rule.force_type()));
            consumed[index] = true;
        } else if rule.target_name().eq_ignore_ascii_case("clock-frequency") {
            node.add_property(DtProperty::numbers(rule.target_name(), [clock_rate]));
        } else if rule.target_name().eq_ignore_ascii_case("regstep") {
            node.add_property(DtProperty::numbers(rule.target_name(), [4]));
        } else if let Some(fixed) = rule.fixed_value() {
            if let Some(property) = fixed_property(rule, fixed) {
                node.add_property(property);
            }
        }
    }

    for (index, parameter) in component.parameters().iter().enumerate() {
        if consumed[index] {
            continue;
        }
        if parameter.name().eq_ignore_ascii_case(DTS_COMPATIBLE) {
            // Extends the compatible list instead of becoming a property.
            if let Some(compatible) = node.property_mut("compatible") {
                compatible.append_strings(parameter.value().split_whitespace());
            }
        } else if let Some(rest) = parameter.name().strip_prefix(DTS_PARAMS_PREFIX) {
            node.add_property(parameter.to_dt_property(rest, None));
        } else {
            let dumped = match (
                parameter.name().strip_prefix(CMACRO_PREFIX),
                board.parameter_dump(),
            ) {
                (Some(_), ParameterDump::None) => None,
                (Some(rest), _) => Some(rest),
                (None, ParameterDump::All) => Some(parameter.name()),
                (None, _) => None,
            };
            if let Some(dumped) = dumped {
                let target = format!("{},{}", entry.vendor(), dumped.replace('_', "-"));
                node.add_property(parameter.to_dt_property(&target, None));
            }
        }
    }

    node
}

/// Translates every component in the netlist into a child of a fresh root
/// node.
///
/// Each component is synthesized with no parent connection, so register
/// addresses resolve only where they are unambiguous (a single connection on
/// the memory-slave interface). Callers walking the bus hierarchy themselves
/// should call [`synthesize_node`] with the placing connection instead.
/// Children are keyed by node name; components that resolve to the same name
/// and unit address replace each other.
#[must_use]
pub fn translate(netlist: &Netlist, board: &BoardConfig, diag: &dyn DiagnosticSink) -> DtNode {
    let mut root = DtNode::new("/");
    for component in netlist.components() {
        root.add_child(synthesize_node(netlist, component, None, board, diag));
    }
    root
}

/// Formats address words as the unit-address suffix: the first word bare,
/// following words zero-padded to full width.
fn address_suffix(words: &[u32]) -> String {
    let mut suffix = String::new();
    for (index, word) in words.iter().enumerate() {
        if index == 0 {
            let _ = write!(suffix, "{word:x}");
        } else {
            let _ = write!(suffix, "{word:08X}");
        }
    }
    suffix
}

/// Builds the property for an auto-param rule's fixed fallback value. A
/// fixed value that fails to parse as its forced numeric type produces no
/// property at all.
fn fixed_property(rule: &AutoParam, fixed: &str) -> Option<DtProperty> {
    match rule.force_type() {
        Some(ForceType::Unsigned) => {
            parse_number(fixed).map(|number| DtProperty::numbers(rule.target_name(), [number]))
        }
        Some(ForceType::String) => Some(DtProperty::strings(rule.target_name(), [fixed])),
        None => Some(DtProperty::new(rule.target_name(), inferred_value(fixed))),
    }
}

fn widen(words: &[u32]) -> Vec<u64> {
    words.iter().copied().map(u64::from).collect()
}
