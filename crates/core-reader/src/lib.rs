//! The bidirectional chromosome reader: maintains a consistent active-feature
//! multiset at an arbitrary sequence position while supporting forward
//! advance, backward retreat, and absolute seek.
//!
//! One [`Reader`] owns one chromosome's sequence and metadata bytes;
//! `core-view::ReaderCache` is responsible for opening, caching, and
//! evicting readers as the viewport crosses chromosome boundaries.

mod cds;
mod error;

use std::collections::VecDeque;
use std::path::Path;

use core_format::{FeatureCounts, FeatureKind, FeatureTag, GenePayload, MetadataFile, RecordPayload, SequenceFile, Strand};

use cds::CdsPhaseCache;
pub use error::ReaderOpenError;

/// Number of trailing decoded nucleotides kept for consensus-pattern
/// highlighting (spec.md §4.3/§4.4).
pub const RING_SIZE: usize = 20;

/// The gene currently "active" at the cursor, tracked for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneInfo {
    pub strand: Strand,
    pub name: String,
}

/// Holds one chromosome's open sequence and metadata, plus the cursor state
/// spec.md §4.3 requires: position, active-feature multiset, the next
/// unapplied event, the most recently applied event's position, a CDS phase
/// cache, and a ring buffer of decoded nucleotides.
pub struct Reader {
    chromosome: String,
    sequence: SequenceFile,
    metadata: MetadataFile,
    /// Byte offset into `metadata`'s bytes equivalent to a Python file
    /// object's `tell()`: always "just after the tag byte of `next_feat`",
    /// the same invariant the reference implementation maintains on its
    /// open file handle.
    metadata_pos: usize,
    ch_size: u32,
    pos: u32,
    eof: bool,
    current_features: FeatureCounts,
    next_pos: Option<u32>,
    next_feat: Option<FeatureTag>,
    cur_feat_pos: Option<u32>,
    current_gene: Option<GeneInfo>,
    prev_info_pos: Option<u32>,
    ring: VecDeque<Option<u8>>,
    cds_phase_cache: Option<CdsPhaseCache>,
    /// Set when metadata is missing or a malformed record was encountered;
    /// the chromosome still renders its plain sequence, with no feature
    /// coloring, per spec.md §7.
    degraded: bool,
}

impl Reader {
    /// Open `<chromosome>.bin`/`<chromosome>.dat` under `base_dir`. A
    /// missing or unreadable sequence file is fatal; a missing or malformed
    /// metadata file instead degrades the reader (logged at `warn!`).
    ///
    /// The returned reader sits at the "before position 1" state (an empty
    /// multiset, `pos == 0`) — callers resolve the actual starting position
    /// (absolute, percent, or negative-from-end) and call [`Reader::jump_to`]
    /// themselves, rather than this constructor consulting any global
    /// CLI state the way the reference implementation's `pos_initial` does.
    pub fn open(chromosome: &str, base_dir: &Path) -> Result<Reader, ReaderOpenError> {
        let bin_path = base_dir.join(format!("{chromosome}.bin"));
        let sequence =
            SequenceFile::open(&bin_path).map_err(|source| ReaderOpenError::MissingSequence {
                chromosome: chromosome.to_string(),
                path: bin_path,
                source,
            })?;
        let ch_size = sequence.size();

        let dat_path = base_dir.join(format!("{chromosome}.dat"));
        let (metadata, degraded) = match MetadataFile::open(&dat_path) {
            Ok(m) => (m, false),
            Err(source) => {
                tracing::warn!(
                    target: "reader",
                    chromosome,
                    %source,
                    "metadata file unreadable; opening in degraded mode (sequence only)"
                );
                (MetadataFile::empty(), true)
            }
        };

        let mut reader = Reader {
            chromosome: chromosome.to_string(),
            sequence,
            metadata,
            metadata_pos: 0,
            ch_size,
            pos: 0,
            eof: false,
            current_features: FeatureCounts::new(),
            next_pos: None,
            next_feat: None,
            cur_feat_pos: None,
            current_gene: None,
            prev_info_pos: None,
            ring: VecDeque::with_capacity(RING_SIZE),
            cds_phase_cache: None,
            degraded,
        };
        reader.jump_to_mt_start();
        Ok(reader)
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn ch_size(&self) -> u32 {
        self.ch_size
    }

    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn eof(&self) -> bool {
        self.eof
    }

    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn current_features(&self) -> &FeatureCounts {
        &self.current_features
    }

    pub fn current_gene(&self) -> Option<&GeneInfo> {
        self.current_gene.as_ref()
    }

    pub fn prev_info_pos(&self) -> Option<u32> {
        self.prev_info_pos
    }

    /// Decoded base at the current cursor position (0-3), or `None` if the
    /// cursor sits outside `1..=ch_size` (title/margin rows).
    pub fn current_nucleotide(&self) -> Option<u8> {
        self.decode_at(self.pos)
    }

    /// The ring buffer of the last [`RING_SIZE`] decoded nucleotides, oldest
    /// first, `None` entries where fewer than `RING_SIZE` bases precede the
    /// cursor.
    pub fn last_nucleotides(&self) -> &VecDeque<Option<u8>> {
        &self.ring
    }

    fn decode_at(&self, p: u32) -> Option<u8> {
        if p >= 1 && p <= self.ch_size {
            Some(self.sequence.decode(p))
        } else {
            None
        }
    }

    fn push_ring(&mut self, value: Option<u8>) {
        if self.ring.len() == RING_SIZE {
            self.ring.pop_front();
        }
        self.ring.push_back(value);
    }

    fn advance_nucleotide(&mut self) {
        self.pos += 1;
        let code = self.decode_at(self.pos);
        self.push_ring(code);
    }

    /// Move one nucleotide forward, applying any events at the new position.
    pub fn advance(&mut self) {
        self.advance_nucleotide();
        if self.next_pos == Some(self.pos) {
            while self.next_pos == Some(self.pos) {
                self.update_features();
            }
        }
        if self.pos > self.ch_size {
            self.eof = true;
        }
    }

    /// Seek to an arbitrary `p ∈ [1, ch_size]`, replaying feature events so
    /// the active-feature multiset holds exactly what a forward scan from 1
    /// would produce, and refilling the nucleotide ring buffer so consensus
    /// highlighting works immediately. Mirrors `Reader.jump_to` in the
    /// reference implementation, including its anchor-reselection recursion.
    pub fn jump_to(&mut self, p: u32) {
        if p == 1 {
            self.jump_to_mt_start();
        } else if p == self.ch_size {
            self.jump_to_mt_end();
        } else if p < p.abs_diff(self.pos) {
            self.jump_to(1);
        } else if self.ch_size.saturating_sub(p) < p.abs_diff(self.pos) {
            self.jump_to(self.ch_size);
        }

        if p > self.pos {
            while let Some(next_pos) = self.next_pos {
                if p < next_pos {
                    break;
                }
                self.update_features();
            }
        }
        if p < self.pos {
            while let Some(cur_feat_pos) = self.cur_feat_pos {
                if p >= cur_feat_pos {
                    break;
                }
                self.update_features_backwards();
            }
        }

        self.ring = VecDeque::from(vec![None; RING_SIZE]);
        self.pos = if p > RING_SIZE as u32 { p - RING_SIZE as u32 } else { 1 };
        while self.pos < p {
            self.advance_nucleotide();
        }

        tracing::debug!(
            target: "reader",
            chromosome = %self.chromosome,
            to = p,
            "jump_to complete"
        );
    }

    fn jump_to_mt_start(&mut self) {
        let mut cur = self.metadata.cursor_at_start();
        self.cur_feat_pos = None;
        self.current_features.clear();
        self.pos = 0;
        if cur.at_eof_for_header() {
            self.next_pos = None;
            self.next_feat = None;
            self.metadata_pos = cur.tell();
        } else {
            match cur.read_header() {
                Ok((position, tag)) => {
                    self.next_pos = Some(position);
                    self.next_feat = Some(tag);
                    self.metadata_pos = cur.tell();
                }
                Err(err) => {
                    let tell = cur.tell();
                    self.degrade(err);
                    self.metadata_pos = tell;
                }
            }
        }
    }

    fn jump_to_mt_end(&mut self) {
        self.next_pos = None;
        self.cur_feat_pos = None;
        self.current_features.clear();

        let mut cur = self.metadata.cursor_at_end();
        let _ = cur.unget_feature();
        // Lenient by design: the reference implementation reads the
        // position field with no bounds check here, tolerating a metadata
        // file too short to hold a second record (practically unreachable
        // for a real chromosome's `.dat`).
        self.cur_feat_pos = Some(read_u32_lenient(self.metadata.as_bytes(), cur.tell()));
        self.next_feat = None;
        self.metadata_pos = self.metadata.len();
    }

    fn degrade(&mut self, err: core_format::FormatError) {
        tracing::warn!(
            target: "reader",
            chromosome = %self.chromosome,
            %err,
            "malformed metadata record; falling back to degraded mode"
        );
        self.degraded = true;
        self.next_pos = None;
        self.next_feat = None;
    }

    /// Apply `next_feat`, consume its payload, and advance to the following
    /// record's header (or EOF).
    fn update_features(&mut self) {
        let Some(next_pos) = self.next_pos else {
            return;
        };
        let Some(next_feat) = self.next_feat else {
            return;
        };
        self.cur_feat_pos = Some(next_pos);
        self.current_features.apply(next_feat);

        let mut cur = self.metadata.cursor_at(self.metadata_pos);
        let payload = match cur.read_payload(next_feat) {
            Ok(p) => p,
            Err(err) => {
                let tell = cur.tell();
                self.degrade(err);
                self.metadata_pos = tell;
                return;
            }
        };
        if let RecordPayload::Gene(GenePayload { strand, name }) = payload {
            self.current_gene = Some(GeneInfo { strand, name });
            self.prev_info_pos = Some(next_pos);
        }

        if cur.at_eof_for_header() {
            self.next_pos = None;
            self.next_feat = None;
            self.metadata_pos = cur.tell();
        } else {
            match cur.read_header() {
                Ok((position, tag)) => {
                    self.next_pos = Some(position);
                    self.next_feat = Some(tag);
                    self.metadata_pos = cur.tell();
                }
                Err(err) => {
                    let tell = cur.tell();
                    self.degrade(err);
                    self.metadata_pos = tell;
                }
            }
        }
    }

    /// Undo the most recently applied record, walking the metadata cursor
    /// back by one record using its `tag_copy` trailer. Mirrors
    /// `Reader.update_features_backwards` exactly, including its reuse of
    /// `next_feat` as scratch space while re-deriving the new current
    /// record's payload length (a side effect only; like the reference
    /// implementation, the discarded payload means `current_gene` is not
    /// refreshed on backward motion — the renderer relies on
    /// `prev_info_pos` distance checks instead, not live updates here).
    fn update_features_backwards(&mut self) {
        self.next_pos = self.cur_feat_pos;

        let mut cur = self.metadata.cursor_at(self.metadata_pos);
        let lost_feat = if self.next_feat.is_none() {
            cur.seek(cur.tell() - 1);
            match cur.read_u8() {
                Ok(b) => FeatureTag(b),
                Err(err) => {
                    self.degrade(err);
                    return;
                }
            }
        } else {
            match cur.unget_feature() {
                Ok(Some(tag)) => tag,
                Ok(None) => {
                    // No previous record exists; nothing to undo.
                    return;
                }
                Err(err) => {
                    self.degrade(err);
                    return;
                }
            }
        };
        self.current_features.apply(lost_feat.inverted());

        let exists = match cur.unget_feature() {
            Ok(found) => found,
            Err(err) => {
                self.degrade(err);
                return;
            }
        };

        if exists.is_some() {
            cur.seek(cur.tell() - 5);
            let (position, tag) = match cur.read_header() {
                Ok(v) => v,
                Err(err) => {
                    self.degrade(err);
                    return;
                }
            };
            if let Err(err) = cur.read_payload(tag) {
                self.degrade(err);
                return;
            }
            self.cur_feat_pos = Some(position);
            cur.seek(cur.tell() + 5);
        } else {
            self.cur_feat_pos = None;
        }
        self.next_feat = Some(lost_feat);
        self.metadata_pos = cur.tell();
    }
}

/// Read a little-endian `u32` at `pos`, zero-padding any missing trailing
/// bytes instead of failing. Used only by [`Reader::jump_to_mt_end`]'s
/// faithful reproduction of a Python quirk around very small metadata files.
fn read_u32_lenient(bytes: &[u8], pos: usize) -> u32 {
    let mut buf = [0u8; 4];
    let avail = bytes.len().saturating_sub(pos).min(4);
    if avail > 0 {
        buf[..avail].copy_from_slice(&bytes[pos..pos + avail]);
    }
    u32::from_le_bytes(buf)
}
