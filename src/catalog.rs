// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-class metadata describing how a component translates into a
//! device-tree node.
//!
//! The catalog is an external collaborator: this module defines the lookup
//! interface ([`ComponentCatalog`]) and the entry shape it hands back, plus
//! [`StaticCatalog`], an in-memory implementation used for construction and
//! tests. Lookup never signals a miss: an unmatched class yields
//! [`CatalogEntry::unknown`], so downstream code never branches on catalog
//! absence.

use indexmap::IndexMap;
use twox_hash::xxhash64;

/// Forces the device-tree type of a translated parameter value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ForceType {
    /// Parse the value as an unsigned number.
    Unsigned,
    /// Pass the value through as a string.
    String,
}

/// A catalog-declared mapping from a netlist parameter to a device-tree
/// property.
///
/// When the named source parameter is absent, the rule can still produce a
/// property from a fixed literal value, or from one of the built-in fallback
/// targets handled during synthesis (`clock-frequency`, `regstep`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoParam {
    source_name: String,
    target_name: String,
    force_type: Option<ForceType>,
    fixed_value: Option<String>,
}

impl AutoParam {
    /// Creates a rule translating the parameter `source_name` into a property
    /// named `target_name`.
    #[must_use]
    pub fn new(source_name: impl Into<String>, target_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            target_name: target_name.into(),
            force_type: None,
            fixed_value: None,
        }
    }

    /// Forces the type of the produced property.
    #[must_use]
    pub fn with_force_type(mut self, force_type: ForceType) -> Self {
        self.force_type = Some(force_type);
        self
    }

    /// Sets the literal emitted when the source parameter is absent.
    #[must_use]
    pub fn with_fixed_value(mut self, fixed_value: impl Into<String>) -> Self {
        self.fixed_value = Some(fixed_value.into());
        self
    }

    /// Returns the name of the netlist parameter this rule consumes.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Returns the name of the produced device-tree property.
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Returns the forced property type, if any.
    #[must_use]
    pub fn force_type(&self) -> Option<ForceType> {
        self.force_type
    }

    /// Returns the fixed fallback literal, if any.
    #[must_use]
    pub fn fixed_value(&self) -> Option<&str> {
        self.fixed_value.as_deref()
    }
}

/// Translation rules for one component class.
///
/// # Examples
///
/// ```
/// use soc_device_tree::catalog::CatalogEntry;
///
/// let entry = CatalogEntry::new("serial", "altr").with_compatible("altr,uart-{version}");
/// assert_eq!(entry.compatibles("1.0"), ["altr,uart-1.0"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    group: String,
    vendor: String,
    compatibles: Vec<String>,
    auto_params: Vec<AutoParam>,
}

impl CatalogEntry {
    /// Creates an entry with the given device-tree group and vendor prefix.
    #[must_use]
    pub fn new(group: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            vendor: vendor.into(),
            compatibles: Vec::new(),
            auto_params: Vec::new(),
        }
    }

    /// The stub entry used when a class has no catalog match.
    ///
    /// It carries no compatibles and no auto-param rules, so synthesis still
    /// produces a node, just a bare one.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new("unknown", "unknown")
    }

    /// Appends a compatible-string template. A `{version}` placeholder is
    /// substituted with the component version at lookup time.
    #[must_use]
    pub fn with_compatible(mut self, template: impl Into<String>) -> Self {
        self.compatibles.push(template.into());
        self
    }

    /// Appends an auto-param rule. Rules apply in the order they were added.
    #[must_use]
    pub fn with_auto_param(mut self, rule: AutoParam) -> Self {
        self.auto_params.push(rule);
        self
    }

    /// Returns the device-tree group this class belongs to, e.g. `"cpu"`,
    /// `"memory"` or `"serial"`.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the vendor prefix used for dumped parameters.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Returns the compatible strings for a component of the given version.
    #[must_use]
    pub fn compatibles(&self, version: &str) -> Vec<String> {
        self.compatibles
            .iter()
            .map(|template| template.replace("{version}", version))
            .collect()
    }

    /// Returns the auto-param rules in declaration order.
    #[must_use]
    pub fn auto_params(&self) -> &[AutoParam] {
        &self.auto_params
    }
}

/// Looks up per-class translation rules.
pub trait ComponentCatalog {
    /// Returns the entry for `class_name`, or [`CatalogEntry::unknown`] when
    /// the class has no catalog match.
    fn lookup(&self, class_name: &str) -> CatalogEntry;
}

/// An in-memory catalog backed by an ordered map.
///
/// # Examples
///
/// ```
/// use soc_device_tree::catalog::{CatalogEntry, ComponentCatalog, StaticCatalog};
///
/// let mut catalog = StaticCatalog::new();
/// catalog.insert("uart", CatalogEntry::new("serial", "altr"));
/// assert_eq!(catalog.lookup("uart").group(), "serial");
/// assert_eq!(catalog.lookup("no-such-class").group(), "unknown");
/// ```
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    entries: IndexMap<String, CatalogEntry, xxhash64::State>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self {
            entries: IndexMap::with_hasher(xxhash64::State::with_seed(0xdead_cafe)),
        }
    }
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the entry for a component class, replacing any previous one.
    pub fn insert(&mut self, class_name: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(class_name.into(), entry);
    }
}

impl ComponentCatalog for StaticCatalog {
    fn lookup(&self, class_name: &str) -> CatalogEntry {
        self.entries
            .get(class_name)
            .cloned()
            .unwrap_or_else(CatalogEntry::unknown)
    }
}
