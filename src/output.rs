//! Renderers for a feature matrix.

use std::io::{self, Write};

use crate::{error::Result, features::FeatureMatrix};

/// One line per row, values with 2 decimals joined by `", "`.
pub fn write_csv<W: Write>(matrix: &FeatureMatrix, out: &mut W) -> io::Result<()> {
    for row in &matrix.rows {
        let line = row
            .values()
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn to_csv_string(matrix: &FeatureMatrix) -> String {
    let mut buf = Vec::new();
    // Vec<u8> への書き込みは失敗しない
    let _ = write_csv(matrix, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Whole matrix, rows with provenance, as CBOR.
pub fn to_cbor(matrix: &FeatureMatrix) -> Result<Vec<u8>> {
    Ok(serde_cbor::to_vec(matrix)?)
}

pub fn from_cbor(bytes: &[u8]) -> Result<FeatureMatrix> {
    Ok(serde_cbor::from_slice(bytes)?)
}
