// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use soc_device_tree::board::BoardConfig;
use soc_device_tree::catalog::CatalogEntry;
use soc_device_tree::diag::{CollectingSink, Severity};
use soc_device_tree::resolve::{resolve_clock_rate, resolve_interrupts, resolve_registers};
use soc_device_tree::system::{Component, Endpoint, Interface, InterfaceKind, Netlist};

fn plain(instance: &str, class: &str) -> Component {
    Component::new(instance, class, "1.0", CatalogEntry::unknown())
}

fn memory_master(instance: &str) -> Component {
    plain(instance, "nios2")
        .with_interface(Interface::new("data_master", InterfaceKind::Memory, true))
}

fn irq_receiver(instance: &str) -> Component {
    plain(instance, "nios2").with_interface(Interface::new("irq", InterfaceKind::Interrupt, true))
}

#[test]
fn no_memory_slave_resolves_empty() {
    let mut netlist = Netlist::new();
    netlist
        .add_component(
            plain("timer_0", "timer")
                .with_interface(Interface::new("irq", InterfaceKind::Interrupt, false)),
        )
        .unwrap();

    let timer = netlist.component("timer_0").unwrap();
    let registers = resolve_registers(&netlist, timer, None);
    assert!(registers.is_empty());
    assert_eq!(registers.base(), None);
    assert_eq!(registers.cells_per_row(), 2);
}

#[test]
fn sole_connection_resolves_without_parent() {
    let mut netlist = Netlist::new();
    netlist.add_component(memory_master("cpu_0")).unwrap();
    netlist
        .add_component(plain("uart_0", "uart").with_interface(
            Interface::new("s1", InterfaceKind::Memory, false).with_size([0x20]),
        ))
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0x1000],
        )
        .unwrap();

    let uart = netlist.component("uart_0").unwrap();
    let registers = resolve_registers(&netlist, uart, None);
    assert_eq!(registers.words(), [0x1000, 0x20]);
    assert_eq!(registers.base(), Some(&[0x1000][..]));
    assert_eq!(registers.cells_per_row(), 2);
}

#[test]
fn ambiguous_connections_without_parent_resolve_empty() {
    let mut netlist = Netlist::new();
    netlist.add_component(memory_master("cpu_0")).unwrap();
    netlist.add_component(memory_master("cpu_1")).unwrap();
    netlist
        .add_component(plain("uart_0", "uart").with_interface(
            Interface::new("s1", InterfaceKind::Memory, false).with_size([0x20]),
        ))
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0x1000],
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_1", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0x2000],
        )
        .unwrap();

    let uart = netlist.component("uart_0").unwrap();
    assert!(resolve_registers(&netlist, uart, None).is_empty());
}

#[test]
fn parent_connection_selects_matching_master() {
    let mut netlist = Netlist::new();
    netlist.add_component(memory_master("cpu_0")).unwrap();
    netlist.add_component(memory_master("cpu_1")).unwrap();
    netlist
        .add_component(
            plain("uart_0", "uart").with_interface(
                Interface::new("s1", InterfaceKind::Memory, false)
                    .with_widths(1, 1)
                    .with_size([0x20]),
            ),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0x1000],
        )
        .unwrap();
    let from_cpu_1 = netlist
        .connect(
            Endpoint::new("cpu_1", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0x2000],
        )
        .unwrap();

    let uart = netlist.component("uart_0").unwrap();
    let registers = resolve_registers(&netlist, uart, Some(from_cpu_1));
    assert_eq!(registers.words(), [0x2000, 0x20]);
    assert_eq!(registers.base(), Some(&[0x2000][..]));
    assert_eq!(registers.cells_per_row(), 2);
}

#[test]
fn registers_concatenate_across_interfaces() {
    let mut netlist = Netlist::new();
    netlist.add_component(memory_master("cpu_0")).unwrap();
    netlist
        .add_component(
            plain("dma_0", "dma")
                .with_interface(
                    Interface::new("csr", InterfaceKind::Memory, false).with_size([0x20]),
                )
                .with_interface(
                    Interface::new("descriptors", InterfaceKind::Memory, false).with_size([0x100]),
                ),
        )
        .unwrap();
    let parent = netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("dma_0", "csr"),
            [0x1000],
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("dma_0", "descriptors"),
            [0x2000],
        )
        .unwrap();

    let dma = netlist.component("dma_0").unwrap();
    let registers = resolve_registers(&netlist, dma, Some(parent));
    assert_eq!(registers.words(), [0x1000, 0x20, 0x2000, 0x100]);
    assert_eq!(registers.base(), Some(&[0x1000][..]));
}

#[test]
fn single_interrupt_parent_resolves() {
    let mut netlist = Netlist::new();
    netlist.add_component(irq_receiver("cpu_0")).unwrap();
    netlist
        .add_component(
            plain("timer_0", "timer")
                .with_interface(Interface::new("irq", InterfaceKind::Interrupt, false)),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "irq"),
            Endpoint::new("timer_0", "irq"),
            [5],
        )
        .unwrap();

    let sink = CollectingSink::new();
    let timer = netlist.component("timer_0").unwrap();
    let interrupts = resolve_interrupts(&netlist, timer, &BoardConfig::new(), &sink);
    assert_eq!(interrupts.parent(), Some("cpu_0"));
    assert_eq!(interrupts.values(), [5]);
    assert!(sink.is_empty());
}

#[test]
fn second_master_on_one_port_warns_and_is_dropped() {
    let mut netlist = Netlist::new();
    netlist.add_component(irq_receiver("cpu_0")).unwrap();
    netlist.add_component(irq_receiver("cpu_1")).unwrap();
    netlist
        .add_component(
            plain("timer_0", "timer")
                .with_interface(Interface::new("irq", InterfaceKind::Interrupt, false)),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "irq"),
            Endpoint::new("timer_0", "irq"),
            [1],
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_1", "irq"),
            Endpoint::new("timer_0", "irq"),
            [2],
        )
        .unwrap();

    let sink = CollectingSink::new();
    let timer = netlist.component("timer_0").unwrap();
    let interrupts = resolve_interrupts(&netlist, timer, &BoardConfig::new(), &sink);
    assert_eq!(interrupts.parent(), Some("cpu_0"));
    assert_eq!(interrupts.values(), [1]);

    let diagnostics = sink.drain();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity(), Severity::Warning);
    assert!(diagnostics[0].message().contains("cpu_0"));
    assert!(diagnostics[0].message().contains("cpu_1"));
}

#[test]
fn disagreeing_ports_warn_and_do_not_merge() {
    let mut netlist = Netlist::new();
    netlist.add_component(irq_receiver("cpu_0")).unwrap();
    netlist.add_component(irq_receiver("cpu_1")).unwrap();
    netlist
        .add_component(
            plain("serial_0", "uart")
                .with_interface(Interface::new("irq_a", InterfaceKind::Interrupt, false))
                .with_interface(Interface::new("irq_b", InterfaceKind::Interrupt, false)),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "irq"),
            Endpoint::new("serial_0", "irq_a"),
            [1],
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_1", "irq"),
            Endpoint::new("serial_0", "irq_b"),
            [2],
        )
        .unwrap();

    let sink = CollectingSink::new();
    let serial = netlist.component("serial_0").unwrap();
    let interrupts = resolve_interrupts(&netlist, serial, &BoardConfig::new(), &sink);
    assert_eq!(interrupts.parent(), Some("cpu_0"));
    assert_eq!(interrupts.values(), [1]);

    let diagnostics = sink.drain();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity(), Severity::Warning);
}

#[test]
fn board_allow_list_filters_candidates() {
    let mut netlist = Netlist::new();
    netlist.add_component(irq_receiver("cpu_0")).unwrap();
    netlist.add_component(irq_receiver("intc_0")).unwrap();
    netlist
        .add_component(
            plain("timer_0", "timer")
                .with_interface(Interface::new("irq", InterfaceKind::Interrupt, false)),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("cpu_0", "irq"),
            Endpoint::new("timer_0", "irq"),
            [1],
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("intc_0", "irq"),
            Endpoint::new("timer_0", "irq"),
            [2],
        )
        .unwrap();

    let sink = CollectingSink::new();
    let board = BoardConfig::new().with_irq_masters(["intc_0"]);
    let timer = netlist.component("timer_0").unwrap();
    let interrupts = resolve_interrupts(&netlist, timer, &board, &sink);
    assert_eq!(interrupts.parent(), Some("intc_0"));
    assert_eq!(interrupts.values(), [2]);
    assert!(sink.is_empty());
}

#[test]
fn clock_rate_reads_first_connection() {
    let mut netlist = Netlist::new();
    netlist
        .add_component(
            plain("clk_0", "clock_source")
                .with_interface(Interface::new("out", InterfaceKind::Clock, true)),
        )
        .unwrap();
    netlist
        .add_component(
            plain("uart_0", "uart")
                .with_interface(Interface::new("clk", InterfaceKind::Clock, false)),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("clk_0", "out"),
            Endpoint::new("uart_0", "clk"),
            [50_000_000],
        )
        .unwrap();

    let sink = CollectingSink::new();
    let uart = netlist.component("uart_0").unwrap();
    assert_eq!(resolve_clock_rate(&netlist, uart, &sink), 50_000_000);
    assert!(sink.is_empty());
}

#[test]
fn clock_rate_folds_words_most_significant_first() {
    let mut netlist = Netlist::new();
    netlist
        .add_component(
            plain("clk_0", "clock_source")
                .with_interface(Interface::new("out", InterfaceKind::Clock, true)),
        )
        .unwrap();
    netlist
        .add_component(
            plain("ddr_0", "ddr")
                .with_interface(Interface::new("clk", InterfaceKind::Clock, false)),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("clk_0", "out"),
            Endpoint::new("ddr_0", "clk"),
            [1, 0],
        )
        .unwrap();

    let sink = CollectingSink::new();
    let ddr = netlist.component("ddr_0").unwrap();
    assert_eq!(resolve_clock_rate(&netlist, ddr, &sink), 1 << 32);
}

#[test]
fn unconnected_clock_logs_debug_and_yields_zero() {
    let mut netlist = Netlist::new();
    netlist
        .add_component(
            plain("uart_0", "uart")
                .with_interface(Interface::new("clk", InterfaceKind::Clock, false)),
        )
        .unwrap();

    let sink = CollectingSink::new();
    let uart = netlist.component("uart_0").unwrap();
    assert_eq!(resolve_clock_rate(&netlist, uart, &sink), 0);

    let diagnostics = sink.drain();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity(), Severity::Debug);
}

#[test]
fn last_clock_slave_wins() {
    let mut netlist = Netlist::new();
    netlist
        .add_component(
            plain("clk_0", "clock_source")
                .with_interface(Interface::new("out", InterfaceKind::Clock, true)),
        )
        .unwrap();
    netlist
        .add_component(
            plain("dual_0", "dual_clock_fifo")
                .with_interface(Interface::new("clk_in", InterfaceKind::Clock, false))
                .with_interface(Interface::new("clk_out", InterfaceKind::Clock, false)),
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("clk_0", "out"),
            Endpoint::new("dual_0", "clk_in"),
            [100],
        )
        .unwrap();
    netlist
        .connect(
            Endpoint::new("clk_0", "out"),
            Endpoint::new("dual_0", "clk_out"),
            [200],
        )
        .unwrap();

    let sink = CollectingSink::new();
    let dual = netlist.component("dual_0").unwrap();
    assert_eq!(resolve_clock_rate(&netlist, dual, &sink), 200);
}
