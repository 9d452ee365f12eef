//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] and [`CellValue`] - What a grid position holds
//! - [`CellType`] - The canonical type tag derived from a value
//! - [`CellAddress`] and [`CellRange`] - The A1 address codec

mod address;
mod value;

pub use address::{
    decode_range, encode_cell, CellAddress, CellRange, CellRangeIterator, EMPTY_RANGE,
};
pub use value::{Cell, CellType, CellValue, DATE_FORMAT};
