//! Tab-separated result output.
//!
//! Every row must have as many fields as the header; the underlying `csv`
//! writer rejects ragged rows.

use std::io::Write;

use ::csv::{QuoteStyle, Writer, WriterBuilder};
use traithull_core::{Result, TraitHullError};

/// Streams result rows as TSV, flushing after each row.
pub struct ResultWriter<W: Write> {
    inner: Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        let inner = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .has_headers(false)
            .from_writer(writer);
        Self { inner }
    }

    /// Write the header row.
    pub fn write_header<I, T>(&mut self, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.write_row(columns)
    }

    /// Write one row and flush it.
    pub fn write_row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.inner
            .write_record(fields)
            .map_err(|e| TraitHullError::Io(e.into()))?;
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| TraitHullError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_tab_separated_rows() {
        let mut w = ResultWriter::new(Vec::new());
        w.write_header(["Species_set", "Richness", "Volume"]).unwrap();
        w.write_row(["Random", "3", "6.000000"]).unwrap();
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(out, "Species_set\tRichness\tVolume\nRandom\t3\t6.000000\n");
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut w = ResultWriter::new(Vec::new());
        w.write_header(["a", "b"]).unwrap();
        assert!(w.write_row(["1"]).is_err());
    }
}
