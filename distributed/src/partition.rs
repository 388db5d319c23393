use itertools::Itertools;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PartitionStrategy {
    /// Balanced runs of consecutive lines.
    #[default]
    Contiguous,
    /// Line `i` goes to partition `i % n`.
    RoundRobin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    pub lines: Vec<String>,
}

/// Splits `lines` into exactly `n` partitions, some possibly empty.
pub fn partition(lines: Vec<String>, n: NonZeroUsize, strategy: PartitionStrategy) -> Vec<Partition> {
    let n = n.get();
    match strategy {
        PartitionStrategy::Contiguous => {
            let (base, extra) = (lines.len() / n, lines.len() % n);
            let mut lines = lines.into_iter();
            (0..n)
                .map(|index| {
                    let size = base + usize::from(index < extra);
                    Partition {
                        index,
                        lines: lines.by_ref().take(size).collect(),
                    }
                })
                .collect()
        }
        PartitionStrategy::RoundRobin => {
            let mut groups = lines
                .into_iter()
                .enumerate()
                .into_group_map_by(|(i, _)| i % n);
            (0..n)
                .map(|index| Partition {
                    index,
                    lines: groups
                        .remove(&index)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(_, line)| line)
                        .collect(),
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    fn n(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_contiguous_balanced() {
        let parts = partition(lines(10), n(4), PartitionStrategy::Contiguous);
        let sizes = parts.iter().map(|p| p.lines.len()).collect_vec();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
        let flat = parts.into_iter().flat_map(|p| p.lines).collect_vec();
        assert_eq!(flat, lines(10));
    }

    #[test]
    fn test_round_robin() {
        let parts = partition(lines(5), n(2), PartitionStrategy::RoundRobin);
        assert_eq!(parts[0].lines, vec!["line 0", "line 2", "line 4"]);
        assert_eq!(parts[1].lines, vec!["line 1", "line 3"]);
    }

    #[test]
    fn test_more_partitions_than_lines() {
        for strategy in [PartitionStrategy::Contiguous, PartitionStrategy::RoundRobin] {
            let parts = partition(lines(2), n(5), strategy);
            assert_eq!(parts.len(), 5);
            assert_eq!(parts.iter().map(|p| p.index).collect_vec(), vec![0, 1, 2, 3, 4]);
            assert_eq!(parts.iter().map(|p| p.lines.len()).sum::<usize>(), 2);
        }
    }

    #[test]
    fn test_empty_input() {
        let parts = partition(vec![], n(3), PartitionStrategy::Contiguous);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.lines.is_empty()));
    }
}
