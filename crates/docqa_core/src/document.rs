use std::sync::Arc;

/// One backend document as reported by `GET /documents`.
///
/// `filename` is a display label only; duplicates are possible and it is not a
/// stable key across refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub filename: String,
    pub chunks: u64,
    pub total_chars: u64,
}

impl DocumentSummary {
    pub fn new(filename: impl Into<String>, chunks: u64, total_chars: u64) -> Self {
        Self {
            filename: filename.into(),
            chunks,
            total_chars,
        }
    }
}

/// Client-side mirror of the backend document list, in server order.
///
/// The list is immutable once built. The only way to change what the session
/// sees is to swap in a whole new registry, so a clone handed to a view is a
/// consistent snapshot that no later refresh can modify underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentRegistry {
    documents: Arc<[DocumentSummary]>,
}

impl DocumentRegistry {
    pub fn new(documents: Vec<DocumentSummary>) -> Self {
        Self {
            documents: documents.into(),
        }
    }

    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Aggregates over the current list. Recomputed on every call; sums
    /// saturate at `u64::MAX`.
    pub fn stats(&self) -> CorpusStats {
        self.documents
            .iter()
            .fold(CorpusStats::default(), |mut acc, doc| {
                acc.documents += 1;
                acc.chunks = acc.chunks.saturating_add(doc.chunks);
                acc.total_chars = acc.total_chars.saturating_add(doc.total_chars);
                acc
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorpusStats {
    pub documents: usize,
    pub chunks: u64,
    pub total_chars: u64,
}

/// Chunk count at which the per-document ingestion gauge reads full.
pub const FULL_GAUGE_CHUNKS: u64 = 10;

/// Fill ratio for the per-document ingestion gauge, clamped to `0.0..=1.0`.
pub fn chunk_fill_ratio(chunks: u64) -> f64 {
    (chunks as f64 / FULL_GAUGE_CHUNKS as f64).min(1.0)
}

/// Human-readable size using base 1024: `0 Bytes`, `1.5 KB`, `2 MB`.
///
/// Values carry at most two decimals with trailing zeros trimmed.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::{chunk_fill_ratio, format_size, DocumentRegistry, DocumentSummary};

    #[test]
    fn format_size_picks_unit_and_trims_zeros() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_size(1234567), "1.18 MB");
    }

    #[test]
    fn format_size_stops_at_gigabytes() {
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn fill_ratio_is_clamped() {
        assert_eq!(chunk_fill_ratio(0), 0.0);
        assert_eq!(chunk_fill_ratio(5), 0.5);
        assert_eq!(chunk_fill_ratio(25), 1.0);
    }

    #[test]
    fn stats_sum_every_entry_including_duplicates() {
        let registry = DocumentRegistry::new(vec![
            DocumentSummary::new("a.txt", 2, 900),
            DocumentSummary::new("a.txt", 3, 1100),
            DocumentSummary::new("b.md", 1, 40),
        ]);
        let stats = registry.stats();
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.chunks, 6);
        assert_eq!(stats.total_chars, 2040);
    }

    #[test]
    fn stats_saturate_on_oversized_counts() {
        let registry = DocumentRegistry::new(vec![
            DocumentSummary::new("a.txt", u64::MAX, u64::MAX),
            DocumentSummary::new("b.txt", 1, 1),
        ]);
        let stats = registry.stats();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.chunks, u64::MAX);
        assert_eq!(stats.total_chars, u64::MAX);
    }

    #[test]
    fn clones_share_an_unchanging_snapshot() {
        let registry = DocumentRegistry::new(vec![DocumentSummary::new("a.txt", 1, 10)]);
        let snapshot = registry.clone();
        let registry = DocumentRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert_eq!(snapshot.len(), 1);
    }
}
