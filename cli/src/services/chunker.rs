//! Chunked file processing

use anyhow::Context;
use lde_entitlement::workspace::bytes_to_mb;
use lde_entitlement::EntitlementEngine;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_CHUNK_SIZE: usize = 4096;
const CHECKSUM_MODULUS: u64 = 9973;
/// Credits per chunk, capped per run
const MAX_CHUNK_CREDITS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkStats {
    pub bytes: usize,
    pub lines: usize,
    pub checksum: u64,
}

impl ChunkStats {
    fn of(chunk: &[u8]) -> Self {
        let sum: u64 = chunk.iter().map(|b| *b as u64).sum();
        Self {
            bytes: chunk.len(),
            lines: chunk.iter().filter(|b| **b == b'\n').count(),
            checksum: sum % CHECKSUM_MODULUS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkReport {
    pub chunks: usize,
    pub total_bytes: u64,
    pub total_mb: f64,
    pub total_lines: usize,
    pub avg_checksum: f64,
}

/// Read `path` in `chunk_size` blocks and record the bytes read
pub fn process_file(
    engine: &EntitlementEngine,
    path: &Path,
    chunk_size: usize,
) -> anyhow::Result<ChunkReport> {
    let chunk_size = chunk_size.max(1);
    let mut file =
        File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;

    let mut stats = Vec::new();
    let mut buf = vec![0u8; chunk_size];
    loop {
        let n = read_chunk(&mut file, &mut buf)?;
        if n == 0 {
            break;
        }
        stats.push(ChunkStats::of(&buf[..n]));
        if n < chunk_size {
            break;
        }
    }

    let total_bytes: u64 = stats.iter().map(|s| s.bytes as u64).sum();
    let total_lines = stats.iter().map(|s| s.lines).sum();
    let avg_checksum = if stats.is_empty() {
        0.0
    } else {
        let sum: u64 = stats.iter().map(|s| s.checksum).sum();
        (sum as f64 / stats.len() as f64 * 100.0).round() / 100.0
    };

    engine.record_read(total_bytes);
    engine.add_credits(stats.len().min(MAX_CHUNK_CREDITS) as i64);

    tracing::debug!(path = %path.display(), chunks = stats.len(), total_bytes, "Processed file");

    Ok(ChunkReport {
        chunks: stats.len(),
        total_bytes,
        total_mb: bytes_to_mb(total_bytes),
        total_lines,
        avg_checksum,
    })
}

/// Fill `buf` as far as the file allows
fn read_chunk(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
