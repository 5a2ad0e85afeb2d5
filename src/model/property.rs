// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::fmt;

/// The typed payload of a device-tree property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DtValue {
    /// A boolean presence flag; the property name alone carries the meaning.
    Flag,
    /// Numbers rendered in hexadecimal, grouped `cells_per_row` to a row.
    Hex {
        /// The cell values.
        values: Vec<u64>,
        /// How many cells belong on one row, e.g. address plus size.
        cells_per_row: usize,
    },
    /// Numbers rendered in decimal.
    Numbers(Vec<u64>),
    /// A cross-reference to another node by its instance label.
    PHandle(String),
    /// An ordered list of strings.
    Strings(Vec<String>),
}

/// A named, typed device-tree property.
///
/// # Examples
///
/// ```
/// use soc_device_tree::model::{DtProperty, DtValue};
///
/// let prop = DtProperty::numbers("interrupts", [5]);
/// assert_eq!(prop.name(), "interrupts");
/// assert_eq!(prop.value(), &DtValue::Numbers(vec![5]));
/// assert_eq!(prop.to_string(), "interrupts = <5>;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtProperty {
    name: String,
    value: DtValue,
}

impl DtProperty {
    /// Creates a property with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: DtValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Creates a boolean presence flag.
    #[must_use]
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, DtValue::Flag)
    }

    /// Creates a hex number-list property. `cells_per_row` is clamped to at
    /// least 1.
    #[must_use]
    pub fn hex(name: impl Into<String>, values: impl Into<Vec<u64>>, cells_per_row: usize) -> Self {
        Self::new(
            name,
            DtValue::Hex {
                values: values.into(),
                cells_per_row: cells_per_row.max(1),
            },
        )
    }

    /// Creates a decimal number-list property.
    #[must_use]
    pub fn numbers(name: impl Into<String>, values: impl Into<Vec<u64>>) -> Self {
        Self::new(name, DtValue::Numbers(values.into()))
    }

    /// Creates a phandle reference to the node labeled `label`.
    #[must_use]
    pub fn phandle(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, DtValue::PHandle(label.into()))
    }

    /// Creates a string-list property.
    #[must_use]
    pub fn strings<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            DtValue::Strings(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Returns the name of this property.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of this property.
    #[must_use]
    pub fn value(&self) -> &DtValue {
        &self.value
    }

    /// Sets the value of this property.
    pub fn set_value(&mut self, value: DtValue) {
        self.value = value;
    }

    /// Appends strings to a string-list property.
    ///
    /// Has no effect on other value types.
    ///
    /// # Examples
    ///
    /// ```
    /// use soc_device_tree::model::DtProperty;
    ///
    /// let mut prop = DtProperty::strings("compatible", ["altr,uart-1.0"]);
    /// prop.append_strings(["foo", "bar"]);
    /// assert_eq!(
    ///     prop.as_strings(),
    ///     Some(&["altr,uart-1.0".to_owned(), "foo".to_owned(), "bar".to_owned()][..]),
    /// );
    /// ```
    pub fn append_strings<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let DtValue::Strings(existing) = &mut self.value {
            existing.extend(values.into_iter().map(Into::into));
        }
    }

    /// Returns the decimal numbers of this property, if it is one.
    #[must_use]
    pub fn as_numbers(&self) -> Option<&[u64]> {
        match &self.value {
            DtValue::Numbers(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the hex cells and row width of this property, if it is a hex
    /// number list.
    #[must_use]
    pub fn as_hex(&self) -> Option<(&[u64], usize)> {
        match &self.value {
            DtValue::Hex {
                values,
                cells_per_row,
            } => Some((values, *cells_per_row)),
            _ => None,
        }
    }

    /// Returns the strings of this property, if it is a string list.
    #[must_use]
    pub fn as_strings(&self) -> Option<&[String]> {
        match &self.value {
            DtValue::Strings(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the referenced label, if this property is a phandle.
    #[must_use]
    pub fn as_phandle(&self) -> Option<&str> {
        match &self.value {
            DtValue::PHandle(label) => Some(label),
            _ => None,
        }
    }

    /// Whether this property is a boolean presence flag.
    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.value == DtValue::Flag
    }
}

impl fmt::Display for DtProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            DtValue::Flag => write!(f, "{};", self.name),
            DtValue::Hex {
                values,
                cells_per_row,
            } => {
                if values.is_empty() {
                    return write!(f, "{};", self.name);
                }
                write!(f, "{} = ", self.name)?;
                let rows = values.chunks((*cells_per_row).max(1));
                let count = rows.len();
                for (index, row) in rows.enumerate() {
                    write!(f, "<")?;
                    for (cell_index, cell) in row.iter().enumerate() {
                        if cell_index > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{cell:#x}")?;
                    }
                    write!(f, ">")?;
                    if index + 1 < count {
                        write!(f, ", ")?;
                    }
                }
                write!(f, ";")
            }
            DtValue::Numbers(values) => {
                if values.is_empty() {
                    return write!(f, "{};", self.name);
                }
                write!(f, "{} = <", self.name)?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ">;")
            }
            DtValue::PHandle(label) => write!(f, "{} = <&{label}>;", self.name),
            DtValue::Strings(values) => {
                if values.is_empty() {
                    return write!(f, "{};", self.name);
                }
                write!(f, "{} = ", self.name)?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{value}\"")?;
                }
                write!(f, ";")
            }
        }
    }
}
