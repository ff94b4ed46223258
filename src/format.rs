//! On-disk layout: the file header, page types and fixed sizes

use crate::{Error, Result};
use byteorder::{BigEndian, ByteOrder};

/// First 16 bytes of every database file
pub const SQLITE_HEADER_MAGIC: &[u8; 16] = b"SQLite format 3\0";

/// Size of the database file header, which precedes page 1's B-tree header
pub const FILE_HEADER_SIZE: usize = 100;

/// Offset of the big-endian page size within the file header
pub const PAGE_SIZE_OFFSET: usize = 16;

/// Size of a leaf page header
pub const LEAF_PAGE_HEADER_SIZE: usize = 8;

/// Size of an interior page header (leaf header plus rightmost pointer)
pub const INTERIOR_PAGE_HEADER_SIZE: usize = 12;

/// Size of a cell pointer
pub const CELL_POINTER_SIZE: usize = 2;

/// The 100-byte header at the start of every database file
///
/// Multi-byte fields are big-endian. The comment on each field gives its byte
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// 0: `"SQLite format 3\0"` in a well-formed file
    pub magic: [u8; 16],
    /// 16: a power of two from 512 to 65536
    pub page_size: u32,
    /// 18: 1 for rollback journal, 2 for WAL
    pub write_version: u8,
    /// 19
    pub read_version: u8,
    /// 20: bytes left unused at the end of every page
    pub reserved_space: u8,
    /// 21: always 64
    pub max_payload_fraction: u8,
    /// 22: always 32
    pub min_payload_fraction: u8,
    /// 23: always 32
    pub leaf_payload_fraction: u8,
    /// 24
    pub file_change_counter: u32,
    /// 28: in pages; see [`FileHeader::database_size_is_valid`]
    pub database_size: u32,
    /// 32: zero when the freelist is empty
    pub first_freelist_page: u32,
    /// 36
    pub freelist_pages: u32,
    /// 40
    pub schema_cookie: u32,
    /// 44: 1 to 4
    pub schema_format: u32,
    /// 48
    pub default_cache_size: u32,
    /// 52: non-zero only in auto-vacuum databases
    pub largest_root_page: u32,
    /// 56: 1 = UTF-8, 2 = UTF-16le, 3 = UTF-16be
    pub text_encoding: u32,
    /// 60
    pub user_version: u32,
    /// 64
    pub incremental_vacuum: u32,
    /// 68
    pub application_id: u32,
    /// 92: change counter value when `database_size` was last written
    pub version_valid_for: u32,
    /// 96: library version that last wrote the file
    pub sqlite_version: u32,
}

impl FileHeader {
    /// Parse the file header from the first 100 bytes of `data`
    ///
    /// The magic string is recorded but not validated here; see
    /// [`FileHeader::has_valid_magic`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < FILE_HEADER_SIZE {
            return Err(Error::ShortFileHeader {
                available: data.len(),
            });
        }

        let mut magic = [0u8; 16];
        magic.copy_from_slice(&data[..16]);

        // A stored page size of 1 stands for 65536, which does not fit in 16 bits
        let page_size = match BigEndian::read_u16(&data[PAGE_SIZE_OFFSET..]) {
            1 => 65536,
            size => u32::from(size),
        };

        Ok(Self {
            magic,
            page_size,
            write_version: data[18],
            read_version: data[19],
            reserved_space: data[20],
            max_payload_fraction: data[21],
            min_payload_fraction: data[22],
            leaf_payload_fraction: data[23],
            file_change_counter: BigEndian::read_u32(&data[24..28]),
            database_size: BigEndian::read_u32(&data[28..32]),
            first_freelist_page: BigEndian::read_u32(&data[32..36]),
            freelist_pages: BigEndian::read_u32(&data[36..40]),
            schema_cookie: BigEndian::read_u32(&data[40..44]),
            schema_format: BigEndian::read_u32(&data[44..48]),
            default_cache_size: BigEndian::read_u32(&data[48..52]),
            largest_root_page: BigEndian::read_u32(&data[52..56]),
            text_encoding: BigEndian::read_u32(&data[56..60]),
            user_version: BigEndian::read_u32(&data[60..64]),
            incremental_vacuum: BigEndian::read_u32(&data[64..68]),
            application_id: BigEndian::read_u32(&data[68..72]),
            version_valid_for: BigEndian::read_u32(&data[92..96]),
            sqlite_version: BigEndian::read_u32(&data[96..100]),
        })
    }

    #[must_use]
    pub fn has_valid_magic(&self) -> bool {
        &self.magic == SQLITE_HEADER_MAGIC
    }

    /// Whether `database_size` can be trusted
    ///
    /// Writers that predate the in-header size leave the change counter and
    /// version-valid-for out of step.
    #[must_use]
    pub const fn database_size_is_valid(&self) -> bool {
        self.database_size != 0 && self.file_change_counter == self.version_valid_for
    }

    /// Usable size U: page size less the reserved tail
    #[must_use]
    pub fn usable_space(&self) -> u32 {
        self.page_size.saturating_sub(u32::from(self.reserved_space))
    }

    /// Largest payload a leaf table cell keeps on its own page, `U - 35`
    #[must_use]
    pub fn leaf_table_max_local(&self) -> u32 {
        self.usable_space().saturating_sub(35)
    }

    /// Payload kept locally once a cell spills, `(U - 12) * 32 / 255 - 23`
    #[must_use]
    pub fn leaf_table_min_local(&self) -> u32 {
        let scaled = self.usable_space().saturating_sub(12) * u32::from(self.leaf_payload_fraction);
        (scaled / 255).saturating_sub(23)
    }
}

/// B-tree page kind, from the first byte of the page header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    InteriorIndex = 0x02,
    InteriorTable = 0x05,
    LeafIndex = 0x0a,
    LeafTable = 0x0d,
}

impl PageType {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x02 => Self::InteriorIndex,
            0x05 => Self::InteriorTable,
            0x0a => Self::LeafIndex,
            0x0d => Self::LeafTable,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::LeafIndex | Self::LeafTable)
    }

    #[must_use]
    pub const fn is_interior(&self) -> bool {
        !self.is_leaf()
    }

    /// Size of the B-tree page header for this page type
    #[must_use]
    pub const fn header_size(&self) -> usize {
        if self.is_leaf() {
            LEAF_PAGE_HEADER_SIZE
        } else {
            INTERIOR_PAGE_HEADER_SIZE
        }
    }
}
