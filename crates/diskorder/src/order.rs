//! The composite sort: physical address ascending, inode breaking ties.

use std::path::PathBuf;

use crate::resolve::SortKey;

/// Permute `paths` into ascending `(physical, inode)` order.
///
/// `keys[i]` must correspond to `paths[i]`. The sort is stable, so in the
/// degenerate case of two files with identical keys their input order is
/// kept. Nothing is filtered or deduplicated: the result is always a
/// permutation of the input.
pub fn sort_by_location(paths: &[PathBuf], keys: &[SortKey]) -> Vec<PathBuf> {
    debug_assert_eq!(paths.len(), keys.len());

    let mut entries: Vec<(SortKey, &PathBuf)> = keys.iter().copied().zip(paths).collect();
    entries.sort_by_key(|&(key, _)| key);
    entries.into_iter().map(|(_, path)| path.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(physical: u64, inode: u64) -> SortKey {
        SortKey { physical, inode }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn sorts_by_physical_address() {
        // /tmp/a at offset 4096, /tmp/b at offset 1024
        let input = paths(&["/tmp/a", "/tmp/b"]);
        let keys = vec![key(4096, 10), key(1024, 11)];
        assert_eq!(sort_by_location(&input, &keys), paths(&["/tmp/b", "/tmp/a"]));
    }

    #[test]
    fn extentless_files_sort_first_by_inode() {
        let input = paths(&["/tmp/data", "/tmp/sparse2", "/tmp/sparse1"]);
        let keys = vec![key(8192, 3), key(0, 20), key(0, 5)];
        assert_eq!(
            sort_by_location(&input, &keys),
            paths(&["/tmp/sparse1", "/tmp/sparse2", "/tmp/data"])
        );
    }

    #[test]
    fn identical_keys_keep_input_order() {
        let input = paths(&["/tmp/first", "/tmp/second"]);
        let keys = vec![key(100, 1), key(100, 1)];
        assert_eq!(
            sort_by_location(&input, &keys),
            paths(&["/tmp/first", "/tmp/second"])
        );
    }

    #[test]
    fn output_is_a_permutation() {
        let input = paths(&["/e", "/d", "/c", "/b", "/a"]);
        let keys = vec![key(5, 1), key(4, 2), key(3, 3), key(2, 4), key(1, 5)];
        let mut sorted = sort_by_location(&input, &keys);
        assert_eq!(sorted, paths(&["/a", "/b", "/c", "/d", "/e"]));

        sorted.sort();
        let mut original = input.clone();
        original.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn single_file_is_trivially_ordered() {
        let input = paths(&["/tmp/c"]);
        let keys = vec![key(0, 42)];
        assert_eq!(sort_by_location(&input, &keys), input);
    }

    #[test]
    fn adjacent_output_keys_are_nondecreasing() {
        let input = paths(&["/p", "/q", "/r", "/s"]);
        let keys = vec![key(0, 9), key(77, 2), key(0, 3), key(77, 1)];

        let mut entries: Vec<(SortKey, &PathBuf)> =
            keys.iter().copied().zip(&input).collect();
        entries.sort_by_key(|&(k, _)| k);
        for pair in entries.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }
}
