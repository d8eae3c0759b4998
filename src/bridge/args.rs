//! Argument coercion
//!
//! Each command reads its payload through [`Args`], which turns a shape
//! mismatch into `BadArgument`. Domain validation happens afterwards, so a
//! malformed call and a rejected value never share an error code.

use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    command: &'static str,
    value: &'a Value,
}

impl<'a> Args<'a> {
    pub fn new(command: &'static str, value: &'a Value) -> Self {
        Self { command, value }
    }

    pub fn bad(&self, reason: impl Into<String>) -> Error {
        Error::BadArgument {
            command: self.command,
            reason: reason.into(),
        }
    }

    fn expected(&self, shape: &str) -> Error {
        self.bad(format!("expected {shape}, got {}", self.value))
    }

    /// No payload
    pub fn none(&self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(self.expected("no argument")),
        }
    }

    pub fn bool(&self) -> Result<bool> {
        self.value.as_bool().ok_or_else(|| self.expected("boolean"))
    }

    /// Integers only; `3.0` is not an integer
    pub fn int(&self) -> Result<i64> {
        self.value.as_i64().ok_or_else(|| self.expected("integer"))
    }

    /// Any JSON number
    pub fn float(&self) -> Result<f64> {
        self.value.as_f64().ok_or_else(|| self.expected("number"))
    }

    pub fn text(&self) -> Result<&'a str> {
        self.value.as_str().ok_or_else(|| self.expected("string"))
    }

    /// Required member of a record argument
    pub fn field(&self, name: &str) -> Result<Args<'a>> {
        let object = self
            .value
            .as_object()
            .ok_or_else(|| self.expected("object"))?;
        let value = object
            .get(name)
            .ok_or_else(|| self.bad(format!("missing field `{name}`")))?;
        Ok(Args {
            command: self.command,
            value,
        })
    }
}
