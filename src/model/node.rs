// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::fmt;

use indexmap::IndexMap;
use twox_hash::xxhash64;

use super::property::DtProperty;

/// A device-tree node: a path name, an optional instance label, and ordered
/// properties and children.
///
/// Children and properties are stored in [`IndexMap`]s, which provide O(1)
/// lookups by name while preserving insertion order. Adding a property or
/// child under an existing name replaces it; producing duplicate property
/// names is an authoring error upstream, not something the node resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtNode {
    name: String,
    label: Option<String>,
    properties: IndexMap<String, DtProperty, xxhash64::State>,
    children: IndexMap<String, DtNode, xxhash64::State>,
}

impl Default for DtNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: None,
            properties: IndexMap::with_hasher(xxhash64::State::with_seed(0xdead_cafe)),
            children: IndexMap::with_hasher(xxhash64::State::with_seed(0xdead_cafe)),
        }
    }
}

impl DtNode {
    /// Creates a new node with the given name.
    ///
    /// # Examples
    ///
    /// ```
    /// use soc_device_tree::model::DtNode;
    ///
    /// let node = DtNode::new("serial@0x1000");
    /// assert_eq!(node.name(), "serial@0x1000");
    /// assert_eq!(node.label(), None);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a new [`DtNodeBuilder`] with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> DtNodeBuilder {
        DtNodeBuilder::new(name)
    }

    /// Returns the name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the instance label of this node, the target name used by
    /// phandle references.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sets the instance label of this node.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Returns an iterator over the properties of this node.
    pub fn properties(&self) -> impl Iterator<Item = &DtProperty> {
        self.properties.values()
    }

    /// Finds a property by its name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&DtProperty> {
        self.properties.get(name)
    }

    /// Finds a property by its name and returns a mutable reference to it.
    #[must_use]
    pub fn property_mut(&mut self, name: &str) -> Option<&mut DtProperty> {
        self.properties.get_mut(name)
    }

    /// Adds a property to this node, replacing any existing property of the
    /// same name.
    pub fn add_property(&mut self, property: DtProperty) {
        self.properties.insert(property.name().to_owned(), property);
    }

    /// Removes a property from this node by its name.
    pub fn remove_property(&mut self, name: &str) -> Option<DtProperty> {
        self.properties.shift_remove(name)
    }

    /// Returns an iterator over the children of this node.
    pub fn children(&self) -> impl Iterator<Item = &DtNode> {
        self.children.values()
    }

    /// Finds a child by its name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&DtNode> {
        self.children.get(name)
    }

    /// Finds a child by its name and returns a mutable reference to it.
    #[must_use]
    pub fn child_mut(&mut self, name: &str) -> Option<&mut DtNode> {
        self.children.get_mut(name)
    }

    /// Adds a child to this node, replacing any existing child of the same
    /// name.
    pub fn add_child(&mut self, child: DtNode) {
        self.children.insert(child.name().to_owned(), child);
    }

    /// Removes a child from this node by its name.
    pub fn remove_child(&mut self, name: &str) -> Option<DtNode> {
        self.children.shift_remove(name)
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "    ".repeat(depth);
        match &self.label {
            Some(label) => writeln!(f, "{pad}{label}: {} {{", self.name)?,
            None => writeln!(f, "{pad}{} {{", self.name)?,
        }
        for property in self.properties.values() {
            writeln!(f, "{pad}    {property}")?;
        }
        for (index, child) in self.children.values().enumerate() {
            if index > 0 || !self.properties.is_empty() {
                writeln!(f)?;
            }
            child.fmt_indented(f, depth + 1)?;
        }
        writeln!(f, "{pad}}};")
    }
}

/// Renders this node and its subtree as device-tree source.
///
/// This is a debugging aid, not a conformant serializer: writing `.dts` or
/// `.dtb` output is the responsibility of an external consumer of the node
/// tree.
impl fmt::Display for DtNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// A builder for creating [`DtNode`]s.
#[derive(Debug, Default)]
pub struct DtNodeBuilder {
    node: DtNode,
}

impl DtNodeBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            node: DtNode::new(name),
        }
    }

    /// Sets the instance label of the node.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.node.set_label(label);
        self
    }

    /// Adds a property to the node.
    #[must_use]
    pub fn property(mut self, property: DtProperty) -> Self {
        self.node.add_property(property);
        self
    }

    /// Adds a child to the node.
    #[must_use]
    pub fn child(mut self, child: DtNode) -> Self {
        self.node.add_child(child);
        self
    }

    /// Builds the `DtNode`.
    #[must_use]
    pub fn build(self) -> DtNode {
        self.node
    }
}
