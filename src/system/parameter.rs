// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::catalog::ForceType;
use crate::model::{DtProperty, DtValue};

/// A literal name/value pair attached to a component instance, sourced from
/// the netlist.
///
/// Most parameters are plain vendor data, but a few names carry reserved
/// meaning during synthesis (compatible-list augmentation, direct property
/// overrides, C-macro dumps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the literal value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Converts this parameter into a property named `target`.
    ///
    /// A forced [`ForceType::Unsigned`] parses the value as a number and
    /// falls back to a string when parsing fails; a forced
    /// [`ForceType::String`] passes the literal through. With no forced type
    /// the property type is inferred from the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use soc_device_tree::model::DtValue;
    /// use soc_device_tree::system::Parameter;
    ///
    /// let parameter = Parameter::new("baudRate", "115200");
    /// let property = parameter.to_dt_property("current-speed", None);
    /// assert_eq!(property.name(), "current-speed");
    /// assert_eq!(property.value(), &DtValue::Numbers(vec![115200]));
    /// ```
    #[must_use]
    pub fn to_dt_property(&self, target: &str, force_type: Option<ForceType>) -> DtProperty {
        let value = match force_type {
            Some(ForceType::Unsigned) => match parse_number(&self.value) {
                Some(number) => DtValue::Numbers(vec![number]),
                None => DtValue::Strings(vec![self.value.clone()]),
            },
            Some(ForceType::String) => DtValue::Strings(vec![self.value.clone()]),
            None => inferred_value(&self.value),
        };
        DtProperty::new(target, value)
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal literal.
pub(crate) fn parse_number(literal: &str) -> Option<u64> {
    let literal = literal.trim();
    if let Some(hex) = literal.strip_prefix("0x").or_else(|| literal.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else {
        literal.parse().ok()
    }
}

/// Infers a property value from a literal: hex literals become hex number
/// properties, decimal literals become decimal number properties, anything
/// else is a string.
pub(crate) fn inferred_value(literal: &str) -> DtValue {
    let trimmed = literal.trim();
    if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        if let Some(number) = parse_number(trimmed) {
            return DtValue::Hex {
                values: vec![number],
                cells_per_row: 1,
            };
        }
    } else if let Some(number) = parse_number(trimmed) {
        return DtValue::Numbers(vec![number]);
    }
    DtValue::Strings(vec![literal.to_owned()])
}
