//! File and page loading

use lru::LruCache;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::{
    config::ReaderConfig,
    error::{Error, Result},
    format::{FILE_HEADER_SIZE, FileHeader},
    logging::{log_error, log_info, log_warn},
    page::{Page, header_offset_for},
    record::SchemaRow,
};

/// What `.dbinfo` reports about a database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbInfo {
    pub page_size: u32,
    /// Number of schema entries on page 1
    pub table_count: u16,
}

/// Decode page 1 of an in-memory database image
///
/// # Errors
///
/// Returns `ShortFileHeader` if `source` is shorter than the file header, and
/// any error from decoding the page itself. A source shorter than one page is
/// decoded as far as it goes.
pub fn load_first_page(source: &[u8]) -> Result<Page> {
    load_page(source, 1)
}

/// Decode page `page_number` of an in-memory database image
pub fn load_page(source: &[u8], page_number: u32) -> Result<Page> {
    let header = FileHeader::parse(source)?;
    if !header.has_valid_magic() {
        log_warn("File header magic does not match; decoding anyway");
    }

    if page_number == 0 {
        return Err(Error::InvalidPage(page_number));
    }

    let page_size = header.page_size as usize;
    let start = (page_number as usize - 1)
        .checked_mul(page_size)
        .ok_or(Error::InvalidPage(page_number))?;
    if start >= source.len() {
        return Err(Error::InvalidPage(page_number));
    }

    let end = source.len().min(start + page_size);
    if end - start < page_size {
        log_warn(&format!(
            "Page {page_number} is truncated: {} of {page_size} bytes available",
            end - start
        ));
    }

    decode_with_header(&source[start..end], page_number, &header)
}

fn decode_with_header(data: &[u8], page_number: u32, header: &FileHeader) -> Result<Page> {
    Page::decode_with_usable_size(
        data,
        page_number,
        header_offset_for(page_number),
        header.usable_space() as usize,
    )
}

/// `SQLite` database reader
pub struct Database<IO: Read + Seek> {
    stream: IO,
    header: FileHeader,
    config: ReaderConfig,
    /// Cache of recently read pages (`page_number` -> Page)
    page_cache: LruCache<u32, Page>,
}

impl Database<BufReader<File>> {
    /// Open a `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened (e.g., does not exist, permission denied).
    /// - The file is shorter than the 100-byte file header.
    /// - The file is not a valid `SQLite` database (invalid magic header).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Self> {
        let file = File::open(path)?;
        Self::with_config(BufReader::new(file), config)
    }
}

impl<IO: Read + Seek> Database<IO> {
    /// Create a new Database from a reader
    pub fn new(stream: IO) -> Result<Self> {
        Self::with_config(stream, ReaderConfig::default())
    }

    /// Create a new Database from a reader with explicit options
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An I/O error occurs while reading the stream.
    /// - The stream holds fewer than 100 bytes (`ShortFileHeader`).
    /// - The magic string is wrong and `config.require_magic` is set.
    pub fn with_config(mut stream: IO, config: ReaderConfig) -> Result<Self> {
        stream.seek(SeekFrom::Start(0))?;
        let mut header_bytes = Vec::with_capacity(FILE_HEADER_SIZE);
        stream
            .by_ref()
            .take(FILE_HEADER_SIZE as u64)
            .read_to_end(&mut header_bytes)?;

        let header = FileHeader::parse(&header_bytes)?;
        if !header.has_valid_magic() {
            if config.require_magic {
                return Err(Error::NotADatabase);
            }
            log_warn("File header magic does not match; decoding anyway");
        }
        if header.text_encoding > 1 {
            log_warn(&format!(
                "Database text encoding is {} (UTF-16); text values are decoded as UTF-8",
                header.text_encoding
            ));
        }

        log_info(&format!(
            "Opened database: page size {}, {} pages",
            header.page_size, header.database_size
        ));

        Ok(Self {
            stream,
            header,
            page_cache: LruCache::new(config.page_cache_capacity),
            config,
        })
    }

    #[must_use]
    pub const fn header(&self) -> &FileHeader {
        &self.header
    }

    #[must_use]
    pub const fn config(&self) -> &ReaderConfig {
        &self.config
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.header.page_size
    }

    /// Read and decode a page, using the page cache
    ///
    /// # Errors
    ///
    /// Returns `InvalidPage` for page 0, for pages past the header's database
    /// size (when that size is valid) and for pages past the end of the stream.
    pub fn read_page(&mut self, page_number: u32) -> Result<Page> {
        if page_number == 0
            || (self.header.database_size_is_valid() && page_number > self.header.database_size)
        {
            return Err(Error::InvalidPage(page_number));
        }

        if let Some(page) = self.page_cache.get(&page_number) {
            return Ok(page.clone());
        }

        let page_size = u64::from(self.header.page_size);
        let offset = u64::from(page_number - 1) * page_size;

        self.stream.seek(SeekFrom::Start(offset))?;
        let mut data = Vec::with_capacity(self.header.page_size as usize);
        self.stream.by_ref().take(page_size).read_to_end(&mut data)?;

        if data.is_empty() {
            return Err(Error::InvalidPage(page_number));
        }
        if (data.len() as u64) < page_size {
            log_warn(&format!(
                "Page {page_number} is truncated: {} of {page_size} bytes available",
                data.len()
            ));
        }

        let page = decode_with_header(&data, page_number, &self.header)
            .inspect_err(|e| log_error(&format!("Failed to decode page {page_number}: {e}")))?;
        self.page_cache.put(page_number, page.clone());

        Ok(page)
    }

    pub fn first_page(&mut self) -> Result<Page> {
        self.read_page(1)
    }

    /// Schema rows stored on page 1
    ///
    /// A schema large enough to need interior pages is only partly listed.
    pub fn schema(&mut self) -> Result<Vec<SchemaRow>> {
        let page = self.first_page()?;
        if page.header.page_type.is_interior() {
            log_warn(&format!(
                "Schema table spans {} child pages; only page 1 is read",
                page.child_pages().len()
            ));
        }
        Ok(page.schema_rows().cloned().collect())
    }

    /// List all user tables in the database
    pub fn tables(&mut self) -> Result<Vec<String>> {
        Ok(self
            .schema()?
            .into_iter()
            .filter(|row| row.object_type == "table" && !row.name.starts_with("sqlite_"))
            .map(|row| row.name)
            .collect())
    }

    pub fn info(&mut self) -> Result<DbInfo> {
        let page = self.first_page()?;
        Ok(DbInfo {
            page_size: self.header.page_size,
            table_count: page.header.cell_count,
        })
    }
}
