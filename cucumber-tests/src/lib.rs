//! Cucumber world and step definitions for the Permgate BDD suite.

pub mod features;
