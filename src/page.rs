//! B-tree page decoding

use crate::{
    Error, Result,
    format::{CELL_POINTER_SIZE, FILE_HEADER_SIZE, LEAF_PAGE_HEADER_SIZE, PageType},
    logging::log_debug,
    record::{Cell, ChildPointer, SchemaRow, decode_interior_table_cell, decode_leaf_table_cell},
};
use byteorder::{BigEndian, ByteOrder};

/// The B-tree header at the start of every page (after the file header on page 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHeader {
    pub page_type: PageType,
    /// Offset of the first freeblock, or 0 if there are none
    pub first_freeblock: u16,
    /// Number of cells on this page
    pub cell_count: u16,
    /// Start of the cell content area; 0 stands for 65536
    pub cell_content_start: u16,
    /// Number of fragmented free bytes
    pub fragmented_free_bytes: u8,
    /// Right-most child page, present only on interior pages
    pub rightmost_pointer: Option<u32>,
}

impl PageHeader {
    /// Parse the page header starting at `offset` in `data`
    ///
    /// # Errors
    ///
    /// Returns `TruncatedHeader` if fewer than 8 bytes (12 for interior pages)
    /// remain after `offset`, and `InvalidPageType` for an unknown type byte.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let available = data.len().saturating_sub(offset);
        if available < LEAF_PAGE_HEADER_SIZE {
            return Err(Error::TruncatedHeader {
                offset,
                needed: LEAF_PAGE_HEADER_SIZE,
                available,
            });
        }

        let header = &data[offset..];
        let page_type = PageType::from_byte(header[0]).ok_or(Error::InvalidPageType(header[0]))?;

        let needed = page_type.header_size();
        if available < needed {
            return Err(Error::TruncatedHeader {
                offset,
                needed,
                available,
            });
        }

        Ok(Self {
            page_type,
            first_freeblock: BigEndian::read_u16(&header[1..3]),
            cell_count: BigEndian::read_u16(&header[3..5]),
            cell_content_start: BigEndian::read_u16(&header[5..7]),
            fragmented_free_bytes: header[7],
            rightmost_pointer: page_type
                .is_interior()
                .then(|| BigEndian::read_u32(&header[8..12])),
        })
    }

    /// Size of this header in bytes: 12 with a rightmost pointer, 8 without
    #[must_use]
    pub const fn size(&self) -> usize {
        self.page_type.header_size()
    }

    #[must_use]
    pub fn cell_content_area_start(&self) -> u32 {
        match self.cell_content_start {
            0 => 65536,
            start => u32::from(start),
        }
    }
}

/// Read the cell pointer array that follows the page header
///
/// The array is stored newest-first; the returned offsets are in logical
/// (oldest-first) order.
///
/// # Errors
///
/// Returns `TruncatedPointerTable` if the array runs past the end of `data`.
pub fn read_cell_pointers(data: &[u8], header_end: usize, cell_count: u16) -> Result<Vec<u16>> {
    let needed = header_end + usize::from(cell_count) * CELL_POINTER_SIZE;
    if data.len() < needed {
        return Err(Error::TruncatedPointerTable {
            needed,
            available: data.len(),
        });
    }

    let mut pointers: Vec<u16> = data[header_end..needed]
        .chunks_exact(CELL_POINTER_SIZE)
        .map(BigEndian::read_u16)
        .collect();
    pointers.reverse();
    Ok(pointers)
}

/// Offset of the B-tree header within a page's buffer
#[must_use]
pub const fn header_offset_for(page_number: u32) -> usize {
    if page_number == 1 { FILE_HEADER_SIZE } else { 0 }
}

/// A decoded B-tree page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,
    pub header: PageHeader,
    /// Cell offsets in logical order
    pub cell_pointers: Vec<u16>,
    /// Leaf table cells, in the order of `cell_pointers`
    pub cells: Vec<Cell>,
    /// Interior table cells, in the order of `cell_pointers`
    pub children: Vec<ChildPointer>,
}

impl Page {
    /// Decode a page whose usable size is the whole of `data`
    pub fn decode(data: &[u8], page_number: u32, header_offset: usize) -> Result<Self> {
        Self::decode_with_usable_size(data, page_number, header_offset, data.len())
    }

    /// Decode a page, sizing the local payload limit from `usable_size`
    ///
    /// `usable_size` is the page size less the reserved bytes at the end of
    /// each page. It may exceed `data.len()` when the source was truncated.
    pub fn decode_with_usable_size(
        data: &[u8],
        page_number: u32,
        header_offset: usize,
        usable_size: usize,
    ) -> Result<Self> {
        let header = PageHeader::parse(data, header_offset)?;
        let cell_pointers = read_cell_pointers(data, header_offset + header.size(), header.cell_count)?;

        let mut cells = Vec::new();
        let mut children = Vec::new();

        match header.page_type {
            PageType::LeafTable => {
                let max_local = usable_size.saturating_sub(35);
                cells = cell_pointers
                    .iter()
                    .map(|&offset| decode_leaf_table_cell(data, usize::from(offset), max_local))
                    .collect::<Result<Vec<_>>>()?;
            }
            PageType::InteriorTable => {
                children = cell_pointers
                    .iter()
                    .map(|&offset| decode_interior_table_cell(data, usize::from(offset)))
                    .collect::<Result<Vec<_>>>()?;
            }
            PageType::LeafIndex | PageType::InteriorIndex => {
                log_debug(&format!(
                    "Page {page_number}: skipping {} {:?} cells",
                    header.cell_count, header.page_type
                ));
            }
        }

        log_debug(&format!(
            "Decoded page {page_number}: {:?}, {} cells",
            header.page_type, header.cell_count
        ));

        Ok(Self {
            page_number,
            header,
            cell_pointers,
            cells,
            children,
        })
    }

    /// Child page numbers of an interior table page, left to right
    ///
    /// Empty for leaf pages.
    #[must_use]
    pub fn child_pages(&self) -> Vec<u32> {
        self.children
            .iter()
            .map(|child| child.left_child)
            .chain(self.header.rightmost_pointer)
            .collect()
    }

    /// Schema rows among this page's cells
    pub fn schema_rows(&self) -> impl Iterator<Item = &SchemaRow> {
        self.cells.iter().filter_map(|cell| cell.record.schema_row())
    }
}

/// Decode one page from its raw bytes
///
/// `header_offset` is 100 for page 1 and 0 for every other page.
pub fn decode_page(data: &[u8], page_number: u32, header_offset: usize) -> Result<Page> {
    Page::decode(data, page_number, header_offset)
}
