use libsqlite3_sys::*;
use pantry_core::{AsValue, Error, Result, Value};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::{
    ffi::{CStr, c_int},
    slice, str,
};

pub(crate) fn extract_value(statement: *mut sqlite3_stmt, index: c_int) -> Result<Value> {
    unsafe {
        let column_type = sqlite3_column_type(statement, index);
        Ok(match column_type {
            SQLITE_NULL => Value::Null,
            SQLITE_INTEGER => sqlite3_column_int64(statement, index).as_value(),
            SQLITE_FLOAT => {
                // Decimals are stored as REAL
                let value = sqlite3_column_double(statement, index);
                Decimal::from_f64(value)
                    .ok_or_else(|| {
                        Error::msg(format!("Value {value}: f64 does not fit into Decimal"))
                    })?
                    .normalize()
                    .as_value()
            }
            SQLITE_TEXT => {
                let ptr = sqlite3_column_text(statement, index);
                let len = sqlite3_column_bytes(statement, index) as usize;
                if ptr.is_null() || len == 0 {
                    String::new().as_value()
                } else {
                    str::from_utf8(slice::from_raw_parts(ptr, len))?
                        .to_string()
                        .as_value()
                }
            }
            _ => {
                return Err(Error::msg(format!(
                    "Unexpected column type {}",
                    column_type
                )));
            }
        })
    }
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> Result<String> {
    unsafe {
        Ok(CStr::from_ptr(sqlite3_column_name(statement, index))
            .to_str()?
            .into())
    }
}
