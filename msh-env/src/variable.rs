// This file is part of msh, a POSIX-style command shell.
// Copyright (C) 2025 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Shell variables
//!
//! The internal variable table is an ordered sequence of name-value pairs.
//! Lookup is linear; assignment replaces an existing entry in place or
//! appends a new one. The table is kept in sync with the process environment
//! only for variables the user exports with the `export` built-in.

/// Name-value pair that defines a variable
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variable {
    /// Name of the variable
    pub name: String,
    /// Value of the variable
    pub value: String,
}

/// Ordered collection of variables
///
/// Invariant: names are unique within the set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableSet {
    all: Vec<Variable>,
}

impl VariableSet {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> VariableSet {
        VariableSet::default()
    }

    /// Returns the value of the variable with the given name, if defined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.all
            .iter()
            .find(|variable| variable.name == name)
            .map(|variable| variable.value.as_str())
    }

    /// Assigns a value to a variable, replacing any existing value.
    pub fn set<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        fn inner(set: &mut VariableSet, name: String, value: String) {
            match set.all.iter_mut().find(|variable| variable.name == name) {
                Some(variable) => variable.value = value,
                None => set.all.push(Variable { name, value }),
            }
        }
        inner(self, name.into(), value.into())
    }

    /// Returns an iterator over the variables in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.all.iter()
    }

    /// Imports name-value pairs, typically from [`std::env::vars`].
    pub fn extend_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in vars {
            self.set(name, value);
        }
    }

    /// Looks up a name in the internal table first and the process
    /// environment second.
    ///
    /// This is the lookup order variable expansion uses.
    #[must_use]
    pub fn value_or_env(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(value) => Some(value.to_string()),
            None => std::env::var(name).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_in_empty_set() {
        let set = VariableSet::new();
        assert_eq!(set.get("PATH"), None);
    }

    #[test]
    fn set_and_get() {
        let mut set = VariableSet::new();
        set.set("FOO", "bar");
        assert_eq!(set.get("FOO"), Some("bar"));
    }

    #[test]
    fn set_replaces_in_place() {
        // Reassignment must not change the position of the entry.
        let mut set = VariableSet::new();
        set.set("A", "1");
        set.set("B", "2");
        set.set("A", "3");
        let names: Vec<&str> = set.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(set.get("A"), Some("3"));
    }

    #[test]
    fn extend_env_imports_pairs() {
        let mut set = VariableSet::new();
        set.extend_env([("X", "1"), ("Y", "2")]);
        assert_eq!(set.get("X"), Some("1"));
        assert_eq!(set.get("Y"), Some("2"));
    }

    #[test]
    fn internal_table_shadows_environment() {
        let mut set = VariableSet::new();
        set.set("PATH", "/nowhere");
        assert_eq!(set.value_or_env("PATH").as_deref(), Some("/nowhere"));
    }
}
