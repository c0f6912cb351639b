//! Integration tests running the `make3dBrain` binary against fake tools.

#![cfg(unix)]

mod helpers;

mod arguments_test;
mod pipeline_test;
