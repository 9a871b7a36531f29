//! Command-line front end for inspecting schedules.

pub mod cli;
