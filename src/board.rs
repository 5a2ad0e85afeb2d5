// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board-level configuration consumed during translation.

use indexmap::IndexSet;
use twox_hash::xxhash64;

use crate::system::Component;

/// Which literal netlist parameters are dumped as vendor-prefixed
/// device-tree properties.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ParameterDump {
    /// Dump no parameters.
    None,
    /// Dump only `embeddedsw.CMacro`-prefixed parameters.
    CMacroOnly,
    /// Dump every remaining parameter.
    #[default]
    All,
}

/// Board-level switches that steer a translation pass.
///
/// # Examples
///
/// ```
/// use soc_device_tree::board::{BoardConfig, ParameterDump};
///
/// let board = BoardConfig::new()
///     .with_irq_masters(["intc_0"])
///     .with_parameter_dump(ParameterDump::CMacroOnly);
/// assert_eq!(board.parameter_dump(), ParameterDump::CMacroOnly);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BoardConfig {
    irq_masters: Option<IndexSet<String, xxhash64::State>>,
    parameter_dump: ParameterDump,
}

impl BoardConfig {
    /// Creates a configuration with default settings: every interrupt-master
    /// component is a valid interrupt parent, and all parameters are dumped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts interrupt routing to the named component instances.
    ///
    /// Without an explicit list, any component carrying an interrupt-master
    /// interface qualifies.
    #[must_use]
    pub fn with_irq_masters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut masters = IndexSet::with_hasher(xxhash64::State::with_seed(0xdead_cafe));
        masters.extend(names.into_iter().map(Into::into));
        self.irq_masters = Some(masters);
        self
    }

    /// Sets the parameter-dump mode.
    #[must_use]
    pub fn with_parameter_dump(mut self, mode: ParameterDump) -> Self {
        self.parameter_dump = mode;
        self
    }

    /// Whether `component` may act as an interrupt parent.
    #[must_use]
    pub fn is_valid_irq_master(&self, component: &Component) -> bool {
        match &self.irq_masters {
            Some(masters) => masters.contains(component.instance_name()),
            None => component.is_interrupt_master(),
        }
    }

    /// Returns the parameter-dump mode.
    #[must_use]
    pub fn parameter_dump(&self) -> ParameterDump {
        self.parameter_dump
    }
}
