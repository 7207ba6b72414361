//! Linear-space Myers diff over arbitrary sequences.
//!
//! Common prefix and suffix are peeled off first, then the remaining middle
//! is split recursively at the middle snake found by a bidirectional search.
//! With a deadline, any middle still unresolved when it passes is reported as
//! entirely changed, so the common subsequence found is a lower bound.

use std::time::Instant;

/// Which elements of each side lie on the common subsequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub kept_a: Vec<bool>,
    pub kept_b: Vec<bool>,
}

impl Alignment {
    /// Length of the common subsequence.
    pub fn matched(&self) -> usize {
        self.kept_a.iter().filter(|k| **k).count()
    }
}

/// Align `a` and `b` along a shortest edit script.
pub fn align<T: PartialEq>(a: &[T], b: &[T], deadline: Option<Instant>) -> Alignment {
    let mut alignment = Alignment {
        kept_a: vec![false; a.len()],
        kept_b: vec![false; b.len()],
    };
    align_range(a, b, 0, 0, deadline, &mut alignment);
    alignment
}

fn align_range<T: PartialEq>(
    a: &[T],
    b: &[T],
    a_off: usize,
    b_off: usize,
    deadline: Option<Instant>,
    out: &mut Alignment,
) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    for i in 0..prefix {
        out.kept_a[a_off + i] = true;
        out.kept_b[b_off + i] = true;
    }
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let (a_off, b_off) = (a_off + prefix, b_off + prefix);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    for i in 0..suffix {
        out.kept_a[a_off + a.len() - 1 - i] = true;
        out.kept_b[b_off + b.len() - 1 - i] = true;
    }
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    if a.is_empty() || b.is_empty() {
        return;
    }

    // A split at either corner would not shrink the problem.
    match middle_snake(a, b, deadline) {
        Some((x, y)) if (x, y) != (0, 0) && (x, y) != (a.len(), b.len()) => {
            align_range(&a[..x], &b[..y], a_off, b_off, deadline, out);
            align_range(&a[x..], &b[y..], a_off + x, b_off + y, deadline, out);
        }
        _ => {}
    }
}

/// Find the point where the forward and reverse searches overlap.
///
/// `None` when the deadline passes first.
fn middle_snake<T: PartialEq>(a: &[T], b: &[T], deadline: Option<Instant>) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let v_offset = max_d;
    let v_len = 2 * max_d + 2;

    let mut v1 = vec![-1isize; v_len as usize];
    let mut v2 = vec![-1isize; v_len as usize];
    v1[(v_offset + 1) as usize] = 0;
    v2[(v_offset + 1) as usize] = 0;

    let delta = n - m;
    // With an odd delta the forward path reaches the overlap first.
    let front = delta % 2 != 0;

    let (mut k1_start, mut k1_end) = (0isize, 0isize);
    let (mut k2_start, mut k2_end) = (0isize, 0isize);

    for d in 0..max_d {
        if deadline.is_some_and(|t| Instant::now() >= t) {
            return None;
        }

        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (v_offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;

            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if front {
                let k2_offset = v_offset + delta - k1;
                if (0..v_len).contains(&k2_offset) && v2[k2_offset as usize] != -1 {
                    let x2 = n - v2[k2_offset as usize];
                    if x1 >= x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (v_offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !front {
                let k1_offset = v_offset + delta - k2;
                if (0..v_len).contains(&k1_offset) && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = v_offset + x1 - k1_offset;
                    if x1 >= n - x2 {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k2 += 2;
        }
    }

    None
}
