// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use soc_device_tree::catalog::CatalogEntry;
use soc_device_tree::error::GraphError;
use soc_device_tree::system::{Component, Endpoint, Interface, InterfaceKind, Netlist, Parameter};

fn plain(instance: &str, class: &str) -> Component {
    Component::new(instance, class, "1.0", CatalogEntry::unknown())
}

fn bus_pair() -> Netlist {
    let mut netlist = Netlist::new();
    netlist
        .add_component(
            plain("cpu_0", "nios2")
                .with_interface(Interface::new("data_master", InterfaceKind::Memory, true)),
        )
        .unwrap();
    netlist
        .add_component(plain("uart_0", "uart").with_interface(
            Interface::new("s1", InterfaceKind::Memory, false).with_size([0x20]),
        ))
        .unwrap();
    netlist
}

#[test]
fn duplicate_instance_names_are_rejected() {
    let mut netlist = Netlist::new();
    netlist.add_component(plain("uart_0", "uart")).unwrap();
    let error = netlist.add_component(plain("uart_0", "timer")).unwrap_err();
    assert!(matches!(error, GraphError::DuplicateComponent(name) if name == "uart_0"));
}

#[test]
fn connect_validates_endpoints() {
    let mut netlist = bus_pair();

    let error = netlist
        .connect(
            Endpoint::new("cpu_9", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0],
        )
        .unwrap_err();
    assert!(matches!(error, GraphError::UnknownComponent(name) if name == "cpu_9"));

    let error = netlist
        .connect(
            Endpoint::new("cpu_0", "no_such_port"),
            Endpoint::new("uart_0", "s1"),
            [0],
        )
        .unwrap_err();
    assert!(matches!(error, GraphError::UnknownInterface { .. }));

    let error = netlist
        .connect(
            Endpoint::new("uart_0", "s1"),
            Endpoint::new("cpu_0", "data_master"),
            [0],
        )
        .unwrap_err();
    assert!(matches!(error, GraphError::ExpectedMaster { .. }));

    netlist
        .component_mut("uart_0")
        .unwrap()
        .add_interface(Interface::new("tx_master", InterfaceKind::Memory, true));
    let error = netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("uart_0", "tx_master"),
            [0],
        )
        .unwrap_err();
    assert!(matches!(error, GraphError::ExpectedSlave { .. }));
}

#[test]
fn self_connections_are_rejected() {
    let mut netlist = Netlist::new();
    netlist
        .add_component(
            plain("dma_0", "dma")
                .with_interface(Interface::new("read_master", InterfaceKind::Memory, true))
                .with_interface(
                    Interface::new("csr", InterfaceKind::Memory, false).with_size([0x20]),
                ),
        )
        .unwrap();

    let error = netlist
        .connect(
            Endpoint::new("dma_0", "read_master"),
            Endpoint::new("dma_0", "csr"),
            [0x1000],
        )
        .unwrap_err();
    assert!(matches!(error, GraphError::SelfConnection(name) if name == "dma_0"));
}

#[test]
fn connections_register_on_both_interfaces() {
    let mut netlist = bus_pair();
    let id = netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0x1000],
        )
        .unwrap();

    let master = netlist
        .component("cpu_0")
        .unwrap()
        .interface("data_master")
        .unwrap();
    assert_eq!(master.connections().collect::<Vec<_>>(), [id]);

    let slave = netlist.component("uart_0").unwrap().interface("s1").unwrap();
    assert_eq!(slave.connections().collect::<Vec<_>>(), [id]);

    let connection = netlist.connection(id);
    assert_eq!(connection.master().component(), "cpu_0");
    assert_eq!(connection.slave().interface(), "s1");
    assert_eq!(connection.value(), [0x1000]);
}

#[test]
fn remove_interface_detaches_the_peer() {
    let mut netlist = bus_pair();
    netlist
        .connect(
            Endpoint::new("cpu_0", "data_master"),
            Endpoint::new("uart_0", "s1"),
            [0x1000],
        )
        .unwrap();

    netlist.remove_interface("uart_0", "s1").unwrap();

    assert!(netlist.component("uart_0").unwrap().interface("s1").is_none());
    let master = netlist
        .component("cpu_0")
        .unwrap()
        .interface("data_master")
        .unwrap();
    assert_eq!(master.connections().count(), 0);

    let error = netlist.remove_interface("uart_0", "s1").unwrap_err();
    assert!(matches!(error, GraphError::UnknownInterface { .. }));
}

#[test]
fn interface_filters_and_predicates_agree() {
    let component = plain("dma_0", "dma")
        .with_interface(Interface::new("read_master", InterfaceKind::Memory, true))
        .with_interface(Interface::new("csr", InterfaceKind::Memory, false))
        .with_interface(Interface::new("irq", InterfaceKind::Interrupt, false))
        .with_interface(Interface::new("clk", InterfaceKind::Clock, false));

    assert_eq!(component.interfaces().count(), 4);
    assert_eq!(
        component
            .interfaces_matching(Some(InterfaceKind::Memory), None)
            .count(),
        2,
    );
    let slaves: Vec<_> = component
        .interfaces_matching(None, Some(false))
        .map(|interface| interface.name().to_owned())
        .collect();
    assert_eq!(slaves, ["csr", "irq", "clk"]);

    assert!(component.has_memory_master());
    assert!(!component.is_interrupt_master());

    let csr = component.interface("csr").unwrap();
    assert!(csr.is_memory_slave());
    assert!(!csr.is_memory_master());
    assert!(!csr.is_irq_slave());

    let clk = component.interface("clk").unwrap();
    assert!(clk.is_clock_slave());
}

#[test]
fn parameters_keep_order_and_resolve_by_exact_name() {
    let component = plain("uart_0", "uart")
        .with_parameter(Parameter::new("baudRate", "115200"))
        .with_parameter(Parameter::new("dataBits", "8"));

    let names: Vec<_> = component
        .parameters()
        .iter()
        .map(|parameter| parameter.name().to_owned())
        .collect();
    assert_eq!(names, ["baudRate", "dataBits"]);

    assert_eq!(component.parameter("baudRate").unwrap().value(), "115200");
    assert!(component.parameter("baudrate").is_none());
}

#[test]
fn cloned_netlists_share_nothing() {
    let mut netlist = bus_pair();
    let mut copy = netlist.clone();
    copy.component_mut("uart_0")
        .unwrap()
        .add_interface(Interface::new("irq", InterfaceKind::Interrupt, false));

    assert!(copy.component("uart_0").unwrap().interface("irq").is_some());
    assert!(netlist.component("uart_0").unwrap().interface("irq").is_none());

    // The original is still mutable independently.
    netlist.remove_interface("uart_0", "s1").unwrap();
    assert!(copy.component("uart_0").unwrap().interface("s1").is_some());
}
