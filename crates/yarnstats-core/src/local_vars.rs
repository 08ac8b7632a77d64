//! Scalar variables kept between invocations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{CoreError, CoreResult};

/// Named scalar values, stored as strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalVars {
    vars: BTreeMap<String, String>,
}

impl LocalVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.vars.insert(key.into(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Read a variable as an integer. Absent keys yield `None`.
    pub fn get_int(&self, key: &str) -> CoreResult<Option<i64>> {
        self.get(key)
            .map(|value| parse_int(key, value))
            .transpose()
    }

    /// Add `delta` to an integer variable, treating an absent key as zero.
    /// Returns the new value.
    pub fn add_int(&mut self, key: &str, delta: i64) -> CoreResult<i64> {
        let current = self.get_int(key)?.unwrap_or(0);
        let updated = current.saturating_add(delta);
        self.set(key, updated);
        Ok(updated)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

fn parse_int(key: &str, value: &str) -> CoreResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::NotAnInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent_key() {
        let vars = LocalVars::new();
        assert_eq!(vars.get("lastpoll_at"), None);
        assert_eq!(vars.get_int("lastpoll_at").unwrap(), None);
    }

    #[test]
    fn test_set_stores_strings() {
        let mut vars = LocalVars::new();
        vars.set("lastpoll_at", 1_700_000_000_i64);
        assert_eq!(vars.get("lastpoll_at"), Some("1700000000"));
        assert_eq!(vars.get_int("lastpoll_at").unwrap(), Some(1_700_000_000));

        let json = serde_json::to_string(&vars).unwrap();
        assert_eq!(json, r#"{"lastpoll_at":"1700000000"}"#);
    }

    #[test]
    fn test_add_int() {
        let mut vars = LocalVars::new();
        assert_eq!(vars.add_int("polls_total", 1).unwrap(), 1);
        assert_eq!(vars.add_int("polls_total", 2).unwrap(), 3);
        assert_eq!(vars.get("polls_total"), Some("3"));
    }

    #[test]
    fn test_add_int_rejects_non_integer() {
        let mut vars = LocalVars::new();
        vars.set("name", "default");
        assert!(matches!(
            vars.add_int("name", 1),
            Err(CoreError::NotAnInteger { .. })
        ));
        assert_eq!(vars.get("name"), Some("default"));
    }
}
