//! Builders for hand-made database images

#![allow(dead_code)]

use sqlite_page_reader::encode_varint;

/// A column to encode into a record
pub enum Col<'a> {
    Null,
    Int(i64),
    Float(f64),
    Text(&'a str),
    Blob(&'a [u8]),
}

fn int_serial_type(value: i64) -> (u64, usize) {
    match value {
        v if i8::try_from(v).is_ok() => (1, 1),
        v if i16::try_from(v).is_ok() => (2, 2),
        v if (-(1 << 23)..1 << 23).contains(&v) => (3, 3),
        v if i32::try_from(v).is_ok() => (4, 4),
        v if (-(1 << 47)..1 << 47).contains(&v) => (5, 6),
        _ => (6, 8),
    }
}

/// Encode a record: header size, serial types, then the body
pub fn record(columns: &[Col<'_>]) -> Vec<u8> {
    let mut types = Vec::new();
    let mut body = Vec::new();

    for column in columns {
        match column {
            Col::Null => types.extend(encode_varint(0)),
            Col::Int(value) => {
                let (code, width) = int_serial_type(*value);
                types.extend(encode_varint(code));
                body.extend_from_slice(&value.to_be_bytes()[8 - width..]);
            }
            Col::Float(value) => {
                types.extend(encode_varint(7));
                body.extend_from_slice(&value.to_be_bytes());
            }
            Col::Text(text) => {
                types.extend(encode_varint(text.len() as u64 * 2 + 13));
                body.extend_from_slice(text.as_bytes());
            }
            Col::Blob(blob) => {
                types.extend(encode_varint(blob.len() as u64 * 2 + 12));
                body.extend_from_slice(blob);
            }
        }
    }

    let types_len = types.len() as u64;
    let mut header_size = types_len + 1;
    while encode_varint(header_size).len() as u64 + types_len != header_size {
        header_size = encode_varint(header_size).len() as u64 + types_len;
    }

    let mut payload = encode_varint(header_size);
    payload.extend(types);
    payload.extend(body);
    payload
}

/// Encode a leaf table cell around a record payload
pub fn leaf_cell(rowid: u64, payload: &[u8]) -> Vec<u8> {
    let mut cell = encode_varint(payload.len() as u64);
    cell.extend(encode_varint(rowid));
    cell.extend_from_slice(payload);
    cell
}

/// A schema-table record `(type, name, tbl_name, rootpage, sql)`
pub fn schema_record(object_type: &str, name: &str, root_page: i64, sql: Option<&str>) -> Vec<u8> {
    record(&[
        Col::Text(object_type),
        Col::Text(name),
        Col::Text(name),
        Col::Int(root_page),
        sql.map_or(Col::Null, Col::Text),
    ])
}

/// A single-page database whose page 1 is a leaf table page holding `cells`
///
/// Cells are packed from the end of the page, first cell highest. The pointer
/// array is written newest-first, so the logical order is the order given.
pub fn single_page_database(page_size: u16, cells: &[Vec<u8>]) -> Vec<u8> {
    let size = usize::from(page_size);
    let mut data = vec![0u8; size];

    data[..16].copy_from_slice(b"SQLite format 3\0");
    data[16..18].copy_from_slice(&page_size.to_be_bytes());
    data[18] = 1;
    data[19] = 1;
    data[21] = 64;
    data[22] = 32;
    data[23] = 32;
    data[24..28].copy_from_slice(&1u32.to_be_bytes());
    data[28..32].copy_from_slice(&1u32.to_be_bytes());
    data[44..48].copy_from_slice(&4u32.to_be_bytes());
    data[56..60].copy_from_slice(&1u32.to_be_bytes());
    data[92..96].copy_from_slice(&1u32.to_be_bytes());

    let mut offsets = Vec::with_capacity(cells.len());
    let mut content_start = size;
    for cell in cells {
        content_start -= cell.len();
        data[content_start..content_start + cell.len()].copy_from_slice(cell);
        offsets.push(content_start as u16);
    }

    data[100] = 0x0d;
    data[103..105].copy_from_slice(&(cells.len() as u16).to_be_bytes());
    data[105..107].copy_from_slice(&(content_start as u16).to_be_bytes());

    for (i, offset) in offsets.iter().rev().enumerate() {
        let at = 108 + i * 2;
        data[at..at + 2].copy_from_slice(&offset.to_be_bytes());
    }

    data
}
