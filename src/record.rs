//! `SQLite` cell and record decoding

use crate::{
    Error, Result, Value,
    logging::{LogLevel, is_enabled, log_trace},
    serial_type::SerialType,
    varint::decode_varint,
};
use byteorder::{BigEndian, ByteOrder};

/// A single record column: its serial type and decoded value
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub serial_type: SerialType,
    pub value: Value,
}

/// A row of the schema table: `(type, name, tbl_name, rootpage, sql)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRow {
    /// `table`, `index`, `view` or `trigger`
    pub object_type: String,
    pub name: String,
    pub table_name: String,
    /// Zero for views and triggers
    pub root_page: i64,
    /// NULL for automatically created indexes
    pub sql: Option<String>,
}

impl SchemaRow {
    fn from_columns(columns: &[Column]) -> Option<Self> {
        let [object_type, name, table_name, root_page, sql] = columns else {
            return None;
        };

        let sql = match &sql.value {
            Value::Text(sql) => Some(sql.clone()),
            Value::Null => None,
            _ => return None,
        };

        Some(Self {
            object_type: object_type.value.as_text()?.to_owned(),
            name: name.value.as_text()?.to_owned(),
            table_name: table_name.value.as_text()?.to_owned(),
            root_page: root_page.value.as_integer()?,
            sql,
        })
    }
}

/// A decoded record: header size and typed columns
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Size of the record header in bytes, including its own varint
    pub header_size: u64,
    pub columns: Vec<Column>,
    schema_row: Option<SchemaRow>,
}

impl Record {
    /// Decode a record from a complete, in-memory payload
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut reader = CellReader::new(payload, 0);
        read_record(&mut reader)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.columns.iter().map(|column| &column.value)
    }

    /// The schema-table view of this record
    ///
    /// Present only for five-column records shaped like a schema row
    /// (text, text, text, integer, text or NULL).
    #[must_use]
    pub const fn schema_row(&self) -> Option<&SchemaRow> {
        self.schema_row.as_ref()
    }
}

/// A cell from a leaf table B-tree page
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Total payload size in bytes
    pub payload_size: u64,
    pub rowid: u64,
    pub record: Record,
}

/// A cell from an interior table B-tree page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildPointer {
    /// Page holding keys less than or equal to `rowid`
    pub left_child: u32,
    pub rowid: u64,
}

/// Decode the leaf table cell starting at `offset` in `page`
///
/// `max_local` is the largest payload stored on the page itself; larger
/// payloads continue on overflow pages and are rejected.
///
/// # Errors
///
/// * `OutOfBounds` if the cell or any value extends past the page or the
///   cell's own payload.
/// * `PayloadOverflow` if the payload spills to overflow pages.
/// * `TruncatedRecordHeader`, `InvalidSerialType` or `Utf8` for a malformed record.
pub fn decode_leaf_table_cell(page: &[u8], offset: usize, max_local: usize) -> Result<Cell> {
    let mut reader = CellReader::new(page, offset);

    let payload_size = reader.varint()?;
    let rowid = reader.varint()?;

    if payload_size > max_local as u64 {
        return Err(Error::PayloadOverflow {
            payload_size,
            max_local,
        });
    }

    reader.restrict(payload_size)?;
    let record = read_record(&mut reader)?;

    if is_enabled(LogLevel::Trace) {
        log_trace(&format!(
            "Decoded cell at offset {offset}: rowid {rowid}, payload {payload_size} bytes, {} columns",
            record.len()
        ));
    }

    Ok(Cell {
        payload_size,
        rowid,
        record,
    })
}

/// Decode the interior table cell starting at `offset` in `page`
pub fn decode_interior_table_cell(page: &[u8], offset: usize) -> Result<ChildPointer> {
    let mut reader = CellReader::new(page, offset);
    let left_child = BigEndian::read_u32(reader.take(4)?);
    let rowid = reader.varint()?;

    Ok(ChildPointer { left_child, rowid })
}

fn read_record(reader: &mut CellReader<'_>) -> Result<Record> {
    let (header_size, size_len) = reader.varint_with_len()?;
    let size_len = size_len as u64;

    if header_size < size_len {
        return Err(Error::TruncatedRecordHeader {
            header_size,
            consumed: size_len,
        });
    }

    // Serial types fill the header after the size varint, and must end exactly at its edge
    let serial_types_len = header_size - size_len;
    let mut consumed = 0u64;
    let mut serial_types = Vec::new();

    while consumed < serial_types_len {
        let (code, len) = reader.varint_with_len()?;
        consumed += len as u64;
        if consumed > serial_types_len {
            return Err(Error::TruncatedRecordHeader {
                header_size,
                consumed: size_len + consumed,
            });
        }

        let serial_type = SerialType::from_code(code);
        if let SerialType::Reserved(code) = serial_type {
            return Err(Error::InvalidSerialType(code));
        }
        serial_types.push(serial_type);
    }

    let columns = serial_types
        .into_iter()
        .map(|serial_type| {
            let value = read_value(reader, serial_type)?;
            Ok(Column { serial_type, value })
        })
        .collect::<Result<Vec<_>>>()?;

    let schema_row = SchemaRow::from_columns(&columns);

    Ok(Record {
        header_size,
        columns,
        schema_row,
    })
}

fn read_value(reader: &mut CellReader<'_>, serial_type: SerialType) -> Result<Value> {
    let value = match serial_type {
        SerialType::Null => Value::Null,
        SerialType::ConstZero => Value::Integer(0),
        SerialType::ConstOne => Value::Integer(1),
        SerialType::Integer { width } => {
            let width = usize::from(width);
            // read_int sign-extends from the top bit of the width-byte value
            Value::Integer(BigEndian::read_int(reader.take(width as u64)?, width))
        }
        SerialType::Float => Value::Float(BigEndian::read_f64(reader.take(8)?)),
        SerialType::Blob { length } => Value::Blob(reader.take(length)?.to_vec()),
        SerialType::Text { length } => {
            Value::Text(core::str::from_utf8(reader.take(length)?)?.to_owned())
        }
        SerialType::Reserved(code) => return Err(Error::InvalidSerialType(code)),
    };
    Ok(value)
}

/// Forward-only reader over a page that checks every read against `end`
struct CellReader<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> CellReader<'a> {
    const fn new(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos,
            end: data.len(),
        }
    }

    const fn remaining(&self) -> usize {
        self.end.saturating_sub(self.pos)
    }

    fn out_of_bounds(&self, len: u64) -> Error {
        Error::OutOfBounds {
            offset: self.pos,
            len: usize::try_from(len).unwrap_or(usize::MAX),
            limit: self.end,
        }
    }

    /// Limit further reads to the next `len` bytes
    fn restrict(&mut self, len: u64) -> Result<()> {
        match usize::try_from(len) {
            Ok(len) if len <= self.remaining() => {
                self.end = self.pos + len;
                Ok(())
            }
            _ => Err(self.out_of_bounds(len)),
        }
    }

    fn take(&mut self, len: u64) -> Result<&'a [u8]> {
        match usize::try_from(len) {
            Ok(len) if len <= self.remaining() => {
                let bytes = &self.data[self.pos..self.pos + len];
                self.pos += len;
                Ok(bytes)
            }
            _ => Err(self.out_of_bounds(len)),
        }
    }

    fn window(&self) -> Result<&'a [u8]> {
        if self.remaining() == 0 {
            return Err(self.out_of_bounds(1));
        }
        Ok(&self.data[self.pos..self.end])
    }

    /// A varint cut short by `end` is an out-of-bounds read, not a short input
    fn varint_bounds(&self, err: Error) -> Error {
        match err {
            Error::UnexpectedEndOfInput { available } => self.out_of_bounds(available as u64 + 1),
            other => other,
        }
    }

    fn varint(&mut self) -> Result<u64> {
        self.varint_with_len().map(|(value, _)| value)
    }

    fn varint_with_len(&mut self) -> Result<(u64, usize)> {
        let (value, len) = decode_varint(self.window()?).map_err(|e| self.varint_bounds(e))?;
        self.pos += len;
        Ok((value, len))
    }
}
