//! Sequential and parallel extraction over the located match nodes.
//!
//! The sequential fold is the semantically authoritative mode: grouping
//! inheritance is a fold over the whole node list. Parallel mode splits
//! the list into contiguous chunks for I/O-latency overlap, which breaks
//! that fold at every chunk boundary unless each chunk is seeded with
//! the grouping state a sequential pass would have reached there. The
//! dispatcher therefore runs a cheap header-only scan first and seeds
//! every chunk from it; extracting a chunk from an unseeded baseline
//! loses inheritance for the chunk's leading bare nodes.

use std::ops::Range;

use futures::future;
use tracing::debug;

use crate::error::{ExtractError, SessionError};
use crate::scraper::extractor::{self, GroupContext};
use crate::scraper::session::DomSession;
use crate::sports::ScoringRules;
use crate::types::MatchRecord;

/// Extract all nodes in one sequential fold from an empty baseline.
pub async fn extract_sequential<S: DomSession>(
    session: &S,
    nodes: &[S::Node],
    rules: &ScoringRules,
) -> Result<Vec<MatchRecord>, SessionError> {
    extract_chunk(session, nodes, rules, GroupContext::default()).await
}

/// Extract one contiguous chunk starting from `ctx`.
///
/// Nodes missing required fields are skipped without touching the
/// grouping context; session faults abort the chunk.
pub async fn extract_chunk<S: DomSession>(
    session: &S,
    nodes: &[S::Node],
    rules: &ScoringRules,
    mut ctx: GroupContext,
) -> Result<Vec<MatchRecord>, SessionError> {
    let mut records = Vec::with_capacity(nodes.len());
    for node in nodes {
        match extractor::extract_node(session, node, rules, &mut ctx).await {
            Ok(record) => records.push(record),
            Err(ExtractError::MissingField(field)) => {
                debug!(field, "skipping match node");
            }
            Err(ExtractError::Session(e)) => return Err(e),
        }
    }
    Ok(records)
}

/// Extract nodes across `available_parallelism` chunks concurrently.
///
/// All chunk futures query the same stabilized page read-only; the only
/// win is I/O-latency overlap. Results are concatenated in chunk index
/// order (`join_all` yields in input order, never completion order), so
/// output stays deterministic. Costs one extra header-only scan over all
/// nodes to seed each chunk's grouping baseline.
pub async fn extract_parallel<S: DomSession>(
    session: &S,
    nodes: &[S::Node],
    rules: &ScoringRules,
) -> Result<Vec<MatchRecord>, SessionError> {
    let workers = std::thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1);
    let ranges = partition(nodes.len(), workers);
    if ranges.len() <= 1 {
        return extract_sequential(session, nodes, rules).await;
    }

    let seeds = scan_group_seeds(session, nodes, &ranges).await?;
    debug!(chunks = ranges.len(), "dispatching extraction chunks");

    let futures: Vec<_> = ranges
        .iter()
        .zip(seeds)
        .map(|(range, seed)| extract_chunk(session, &nodes[range.clone()], rules, seed))
        .collect();

    let mut matches = Vec::with_capacity(nodes.len());
    for chunk in future::join_all(futures).await {
        matches.extend(chunk?);
    }
    Ok(matches)
}

/// Contiguous near-equal partition of `0..len` into at most `workers`
/// ranges.
fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 || workers == 0 {
        return Vec::new();
    }
    let workers = workers.min(len);
    let base = len / workers;
    let extra = len % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Sequential header-only scan computing the grouping baseline at each
/// chunk start. Mirrors the extraction fold: nodes that extraction would
/// skip (no team names) do not promote their header.
async fn scan_group_seeds<S: DomSession>(
    session: &S,
    nodes: &[S::Node],
    ranges: &[Range<usize>],
) -> Result<Vec<GroupContext>, SessionError> {
    let mut seeds = Vec::with_capacity(ranges.len());
    let mut ctx = GroupContext::default();
    let mut boundaries = ranges.iter().map(|r| r.start).peekable();

    for (index, node) in nodes.iter().enumerate() {
        if boundaries.peek() == Some(&index) {
            seeds.push(ctx.clone());
            boundaries.next();
        }
        if extractor::find_team_nodes(session, node).await?.is_none() {
            continue;
        }
        if let Some(header) = extractor::read_group_header(session, node).await? {
            if let Some(country) = header.country {
                ctx.country = country;
            }
            if let Some(league) = header.league {
                ctx.league = league;
            }
        }
    }
    // Trailing empty ranges cannot occur; every range holds at least one
    // node, so every boundary was consumed.
    debug_assert_eq!(seeds.len(), ranges.len());
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::Sport;

    /// Session that fails every subtree query, as a crashed browser does.
    struct FaultySession;

    impl DomSession for FaultySession {
        type Node = ();

        async fn navigate(&self, _url: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn evaluate(&self, _script: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn content_size(&self) -> Result<u64, SessionError> {
            Ok(0)
        }

        async fn query(&self, _selector: &str) -> Result<Option<()>, SessionError> {
            Ok(None)
        }

        async fn query_all_in(
            &self,
            _node: &(),
            _selector: &str,
        ) -> Result<Vec<()>, SessionError> {
            Err(SessionError::Backend("connection lost".to_string()))
        }

        async fn read_text(&self, _node: &()) -> Result<String, SessionError> {
            Ok(String::new())
        }

        async fn close(self) -> Result<(), SessionError> {
            Ok(())
        }
    }

    /// A session fault aborts the chunk; it must never read as nodes
    /// without team names and produce a truncated-but-"successful" run.
    #[tokio::test]
    async fn test_session_fault_aborts_chunk() {
        let rules = Sport::Football.scoring().unwrap();
        let err = extract_chunk(&FaultySession, &[(), ()], &rules, GroupContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Backend(_)));
    }

    #[test]
    fn test_partition_near_equal() {
        let ranges = partition(10, 3);
        assert_eq!(ranges, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn test_partition_fewer_nodes_than_workers() {
        let ranges = partition(2, 8);
        assert_eq!(ranges, vec![0..1, 1..2]);
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition(0, 4).is_empty());
    }

    #[test]
    fn test_partition_covers_all_indices() {
        for len in 1..40 {
            for workers in 1..12 {
                let ranges = partition(len, workers);
                assert_eq!(ranges.first().map(|r| r.start), Some(0));
                assert_eq!(ranges.last().map(|r| r.end), Some(len));
                for pair in ranges.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                    assert!(!pair[1].is_empty());
                }
            }
        }
    }
}
