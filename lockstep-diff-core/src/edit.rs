//! Shortest edit scripts between two sequences.
//!
//! The script is found with Myers' greedy O((N+M)·D) algorithm, where D is
//! the number of inserted and deleted items, so comparing two long sequences
//! that differ in a few places stays cheap.

use core::ops::Range;

/// One contiguous region where two sequences differ.
///
/// `a` is replaced by `b`. Either range may be empty (a pure insertion or
/// deletion), but not both. Entries returned by [`edit_script`] are sorted
/// and never overlap or touch in either sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEntry {
    /// Range in the first sequence.
    pub a: Range<usize>,
    /// Range in the second sequence.
    pub b: Range<usize>,
}

impl EditEntry {
    /// Whether both ranges have the same length, so the region can be
    /// compared element by element.
    pub fn is_elementwise(&self) -> bool {
        self.a.len() == self.b.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    /// Delete `a[x]`; the second sequence is at `y`.
    Delete(usize, usize),
    /// Insert `b[y]` at `a[x]`.
    Insert(usize, usize),
}

/// Compute the shortest edit script turning a sequence of `len_a` items into
/// one of `len_b` items. `eq(i, j)` reports whether `a[i]` equals `b[j]`.
pub fn edit_script(
    len_a: usize,
    len_b: usize,
    mut eq: impl FnMut(usize, usize) -> bool,
) -> Vec<EditEntry> {
    let n = len_a as isize;
    let m = len_b as isize;
    let max = n + m;
    let offset = max + 1;
    let at = |k: isize| (offset + k) as usize;

    // v[k] is the furthest x reached on diagonal k = x - y
    let mut v = vec![0isize; (2 * max + 3) as usize];
    // trace[d] holds v over diagonals -(d-1)..=d-1 as it was before step d,
    // the only ones step d reads
    let mut trace: Vec<Vec<isize>> = Vec::new();

    for d in 0..=max {
        if d == 0 {
            trace.push(Vec::new());
        } else {
            trace.push(v[at(1 - d)..=at(d - 1)].to_vec());
        }
        for k in (-d..=d).step_by(2) {
            let mut x = if k == -d || (k != d && v[at(k - 1)] < v[at(k + 1)]) {
                v[at(k + 1)]
            } else {
                v[at(k - 1)] + 1
            };
            let mut y = x - k;
            while x < n && y < m && eq(x as usize, y as usize) {
                x += 1;
                y += 1;
            }
            v[at(k)] = x;
            if x >= n && y >= m {
                return merge(backtrack(&trace, n, m));
            }
        }
    }
    unreachable!("an edit script of length len_a + len_b always exists")
}

fn backtrack(trace: &[Vec<isize>], n: isize, m: isize) -> Vec<Op> {
    let mut ops = Vec::new();
    let (mut x, mut y) = (n, m);

    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        if d == 0 {
            ops.extend((0..x.min(y)).map(|_| Op::Equal));
            break;
        }
        let at = |k: isize| (k + d - 1) as usize;
        let k = x - y;
        let prev_k = if k == -d || (k != d && v[at(k - 1)] < v[at(k + 1)]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[at(prev_k)];
        let prev_y = prev_x - prev_k;
        while x > prev_x && y > prev_y {
            ops.push(Op::Equal);
            x -= 1;
            y -= 1;
        }
        if x == prev_x {
            ops.push(Op::Insert(x as usize, prev_y as usize));
        } else {
            ops.push(Op::Delete(prev_x as usize, y as usize));
        }
        (x, y) = (prev_x, prev_y);
    }

    ops.reverse();
    ops
}

/// Drop equal runs and fuse the deletes and inserts between two equal runs
/// into one entry.
fn merge(ops: Vec<Op>) -> Vec<EditEntry> {
    let mut entries: Vec<EditEntry> = Vec::new();
    let mut need_next = true;
    for op in ops {
        match op {
            Op::Equal => need_next = true,
            Op::Delete(x, y) => match entries.last_mut() {
                Some(last) if !need_next => last.a.end = x + 1,
                _ => {
                    need_next = false;
                    entries.push(EditEntry {
                        a: x..x + 1,
                        b: y..y,
                    });
                }
            },
            Op::Insert(x, y) => match entries.last_mut() {
                Some(last) if !need_next => last.b.end = y + 1,
                _ => {
                    need_next = false;
                    entries.push(EditEntry {
                        a: x..x,
                        b: y..y + 1,
                    });
                }
            },
        }
    }
    entries
}

/// [`edit_script`] over two slices compared with `==`.
pub fn edit_script_slices<T: PartialEq>(a: &[T], b: &[T]) -> Vec<EditEntry> {
    edit_script(a.len(), b.len(), |i, j| a[i] == b[j])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replace every A-range with its B-range.
    fn apply<T: Clone>(a: &[T], b: &[T], script: &[EditEntry]) -> Vec<T> {
        let mut out = Vec::new();
        let mut pos = 0;
        for e in script {
            out.extend_from_slice(&a[pos..e.a.start]);
            out.extend_from_slice(&b[e.b.clone()]);
            pos = e.a.end;
        }
        out.extend_from_slice(&a[pos..]);
        out
    }

    fn check(a: &str, b: &str) -> Vec<EditEntry> {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let script = edit_script_slices(&a, &b);
        assert_eq!(apply(&a, &b, &script), b);
        for pair in script.windows(2) {
            assert!(pair[0].a.end < pair[1].a.start || pair[0].b.end < pair[1].b.start);
            assert!(pair[0].a.end <= pair[1].a.start);
            assert!(pair[0].b.end <= pair[1].b.start);
        }
        script
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(edit_script_slices::<u8>(&[], &[]), []);
        assert_eq!(
            edit_script_slices(&[1, 2], &[]),
            [EditEntry { a: 0..2, b: 0..0 }]
        );
        assert_eq!(
            edit_script_slices(&[], &[1, 2]),
            [EditEntry { a: 0..0, b: 0..2 }]
        );
    }

    #[test]
    fn identical_sequences_have_no_entries() {
        assert_eq!(check("abcdef", "abcdef"), []);
    }

    #[test]
    fn trailing_extra_element_is_one_entry() {
        assert_eq!(
            edit_script_slices(&[1, 2, 3], &[1, 2]),
            [EditEntry { a: 2..3, b: 2..2 }]
        );
    }

    #[test]
    fn single_replacement_is_elementwise() {
        let script = edit_script_slices(&[1, 2, 3], &[1, 9, 3]);
        assert_eq!(script, [EditEntry { a: 1..2, b: 1..2 }]);
        assert!(script[0].is_elementwise());
    }

    #[test]
    fn scripts_reconstruct_the_target() {
        check("ABCABBA", "CBABAC");
        check("kitten", "sitting");
        check("", "xyz");
        check("the quick brown fox", "the slow brown cat");
        check("aaaa", "aaaaaaaa");
    }

    #[test]
    fn script_is_minimal() {
        // classic example from the Myers paper: D = 5
        let script = check("ABCABBA", "CBABAC");
        let d: usize = script.iter().map(|e| e.a.len() + e.b.len()).sum();
        assert_eq!(d, 5);
    }

    #[test]
    fn long_sequences_with_few_changes() {
        let a: Vec<u32> = (0..100_000).collect();
        let mut b = a.clone();
        for i in (0..b.len()).step_by(1000) {
            b[i] = u32::MAX;
        }
        let script = edit_script_slices(&a, &b);
        assert_eq!(script.len(), 100);
        assert!(script.iter().all(EditEntry::is_elementwise));
        assert_eq!(apply(&a, &b, &script), b);
    }

    /// Edit distance from the longest common subsequence, in O(N·M).
    fn lcs_distance(a: &[u8], b: &[u8]) -> usize {
        let mut row = vec![0usize; b.len() + 1];
        for x in a {
            let mut diag = 0;
            for (j, y) in b.iter().enumerate() {
                let up = row[j + 1];
                row[j + 1] = if x == y { diag + 1 } else { up.max(row[j]) };
                diag = up;
            }
        }
        a.len() + b.len() - 2 * row[b.len()]
    }

    #[test]
    fn bolero_scripts_are_ordered_and_reconstruct() {
        bolero::check!()
            .with_type::<(Vec<u8>, Vec<u8>)>()
            .for_each(|(a, b): &(Vec<u8>, Vec<u8>)| {
                // a small alphabet keeps matches frequent
                let a: Vec<u8> = a.iter().map(|c| c % 4).collect();
                let b: Vec<u8> = b.iter().map(|c| c % 4).collect();
                let script = edit_script_slices(&a, &b);
                assert_eq!(apply(&a, &b, &script), b);
                for e in &script {
                    assert!(!e.a.is_empty() || !e.b.is_empty());
                }
                for pair in script.windows(2) {
                    assert!(pair[0].a.end <= pair[1].a.start);
                    assert!(pair[0].b.end <= pair[1].b.start);
                    assert!(pair[0].a.end < pair[1].a.start || pair[0].b.end < pair[1].b.start);
                }
            });
    }

    #[test]
    fn bolero_scripts_are_minimal() {
        bolero::check!()
            .with_type::<(Vec<u8>, Vec<u8>)>()
            .for_each(|(a, b): &(Vec<u8>, Vec<u8>)| {
                if a.len() > 64 || b.len() > 64 {
                    return;
                }
                let a: Vec<u8> = a.iter().map(|c| c % 3).collect();
                let b: Vec<u8> = b.iter().map(|c| c % 3).collect();
                let d: usize = edit_script_slices(&a, &b)
                    .iter()
                    .map(|e| e.a.len() + e.b.len())
                    .sum();
                assert_eq!(d, lcs_distance(&a, &b));
            });
    }
}
