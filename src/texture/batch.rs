//! Parallel decode / encode of many texture records.
//!
//! Records own disjoint byte ranges and share no state, so they decode
//! independently. Output order always matches input order.

use rayon::prelude::*;

use crate::bam::{Datagram, DatagramIterator};
use crate::core::{BamVersion, FileConfig};
use crate::util::Result;

use super::TextureRecord;

/// Decode every record extent, in order.
///
/// Fails with the error of the earliest failing record in input order;
/// a broken record invalidates the whole file.
pub fn decode_records(
    extents: &[&[u8]],
    version: BamVersion,
    config: FileConfig,
) -> Result<Vec<TextureRecord>> {
    let results: Vec<Result<TextureRecord>> = extents
        .par_iter()
        .map(|bytes| {
            let mut di = DatagramIterator::with_config(bytes, config);
            TextureRecord::decode(&mut di, version)
        })
        .collect();

    let records = results.into_iter().collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = records.len(), %version, "decoded texture batch");
    Ok(records)
}

/// Encode every record for `version`, in order.
pub fn encode_records(
    records: &[TextureRecord],
    version: BamVersion,
    config: FileConfig,
) -> Result<Vec<Vec<u8>>> {
    records
        .par_iter()
        .map(|tex| {
            let mut dg = Datagram::with_config(config);
            tex.encode(version, &mut dg)?;
            dg.into_inner()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Error;

    fn record(i: usize) -> TextureRecord {
        let mut tex = TextureRecord::new(format!("tex{}", i));
        tex.payload = vec![i as u8; i];
        tex
    }

    #[test]
    fn test_batch_preserves_order() {
        let version = BamVersion::new(6, 45);
        let cfg = FileConfig::default();
        let records: Vec<_> = (0..64).map(record).collect();

        let encoded = encode_records(&records, version, cfg).unwrap();
        let extents: Vec<&[u8]> = encoded.iter().map(Vec::as_slice).collect();
        let decoded = decode_records(&extents, version, cfg).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_batch_reports_first_error() {
        let version = BamVersion::new(6, 45);
        let good = encode_records(&[record(1)], version, FileConfig::default()).unwrap();
        let truncated: &[u8] = &[1, 0];
        let empty: &[u8] = &[];
        let extents = vec![good[0].as_slice(), truncated, empty];
        let err = decode_records(&extents, version, FileConfig::default()).unwrap_err();
        // Second extent: 1-byte string declared, nothing behind it.
        assert!(matches!(err, Error::MalformedLength { offset: 0, declared: 1, available: 0 }));
    }
}
