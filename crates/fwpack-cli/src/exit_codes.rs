//! Unified exit codes for fwpack.
//! Part of the contract with the invoking build system: a missing build
//! artifact skips packaging but still exits 0 so the build keeps going.

pub const SUCCESS: i32 = 0;
pub const CONFIG_ERROR: i32 = 2; // Bad ini/header, unsupported board, unwritable output
