//! Myers shortest-edit-script diff over line sequences
//!
//! The forward pass records the furthest-reaching endpoint of every diagonal
//! `k = x - y` at the start of each edit distance `d`. The recorded frontiers
//! are never mutated afterwards; backtracking walks them from `(N, M)` back to
//! `(0, 0)` and emits one non-diagonal step per distance level.

use serde::{Deserialize, Serialize};

/// Kind of edit step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Line present in both sequences
    Keep,
    /// Line only in the old sequence
    Delete,
    /// Line only in the new sequence
    Add,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Keep => "keep",
            StepKind::Delete => "delete",
            StepKind::Add => "add",
        }
    }
}

/// One step of an edit script
///
/// `position` indexes the old sequence for `Keep`/`Delete` and the new
/// sequence for `Add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStep {
    pub kind: StepKind,
    pub content: String,
    pub position: usize,
}

impl DiffStep {
    fn new(kind: StepKind, content: &str, position: usize) -> Self {
        Self {
            kind,
            content: content.to_string(),
            position,
        }
    }
}

/// Ordered edit script transforming an old sequence into a new one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    pub steps: Vec<DiffStep>,
}

impl EditScript {
    /// True when every step is a `Keep`
    pub fn is_identity(&self) -> bool {
        self.steps.iter().all(|s| s.kind == StepKind::Keep)
    }

    /// Number of non-keep steps (the edit distance)
    pub fn distance(&self) -> usize {
        self.steps.iter().filter(|s| s.kind != StepKind::Keep).count()
    }

    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }

    /// Replay keep + delete steps
    pub fn old_lines(&self) -> Vec<&str> {
        self.replay(StepKind::Add)
    }

    /// Replay keep + add steps
    pub fn new_lines(&self) -> Vec<&str> {
        self.replay(StepKind::Delete)
    }

    fn replay(&self, skip: StepKind) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.content.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Furthest-reaching x per diagonal, covering `-reach..=reach`
///
/// Diagonals outside the covered range read as 0.
#[derive(Debug, Clone)]
struct Frontier {
    reach: isize,
    xs: Vec<isize>,
}

impl Frontier {
    fn new(reach: isize) -> Self {
        Self {
            reach,
            xs: vec![0; (2 * reach + 1) as usize],
        }
    }

    fn get(&self, k: isize) -> isize {
        if k.abs() > self.reach {
            0
        } else {
            self.xs[(k + self.reach) as usize]
        }
    }

    fn set(&mut self, k: isize, x: isize) {
        debug_assert!(k.abs() <= self.reach);
        self.xs[(k + self.reach) as usize] = x;
    }

    /// Copy into a frontier covering at least `reach` diagonals
    fn widened(&self, reach: isize) -> Self {
        if reach <= self.reach {
            return self.clone();
        }
        let mut wider = Frontier::new(reach);
        for k in -self.reach..=self.reach {
            wider.set(k, self.get(k));
        }
        wider
    }
}

/// Which diagonal the endpoint at `(d, k)` extends from
///
/// Prefers `k + 1` (an insertion) at the lower edge, or when the `k - 1`
/// endpoint is strictly less advanced; otherwise `k - 1` (a deletion).
fn extends_from_above(v: &Frontier, d: isize, k: isize) -> bool {
    k == -d || (k != d && v.get(k - 1) < v.get(k + 1))
}

/// Compute the shortest edit script between two line sequences
pub fn diff_lines<S: AsRef<str>>(old: &[S], new: &[S]) -> EditScript {
    let n = old.len() as isize;
    let m = new.len() as isize;
    let max = n + m;

    let mut v = Frontier::new(1);
    let mut trace: Vec<Frontier> = Vec::new();

    'search: for d in 0..=max {
        trace.push(v.clone());
        v = v.widened(d + 1);

        for k in (-d..=d).step_by(2) {
            let mut x = if extends_from_above(&v, d, k) {
                v.get(k + 1)
            } else {
                v.get(k - 1) + 1
            };
            let mut y = x - k;

            // Follow the snake
            while x < n && y < m && old[x as usize].as_ref() == new[y as usize].as_ref() {
                x += 1;
                y += 1;
            }

            v.set(k, x);

            if x >= n && y >= m {
                break 'search;
            }
        }
    }

    backtrack(&trace, old, new)
}

fn backtrack<S: AsRef<str>>(trace: &[Frontier], old: &[S], new: &[S]) -> EditScript {
    let mut steps = Vec::new();
    let mut x = old.len() as isize;
    let mut y = new.len() as isize;

    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;

        let prev_k = if extends_from_above(v, d, k) { k + 1 } else { k - 1 };
        let prev_x = v.get(prev_k);
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            let i = (x - 1) as usize;
            steps.push(DiffStep::new(StepKind::Keep, old[i].as_ref(), i));
            x -= 1;
            y -= 1;
        }

        if d > 0 {
            if x > prev_x {
                let i = (x - 1) as usize;
                steps.push(DiffStep::new(StepKind::Delete, old[i].as_ref(), i));
                x -= 1;
            } else if y > prev_y {
                let j = (y - 1) as usize;
                steps.push(DiffStep::new(StepKind::Add, new[j].as_ref(), j));
                y -= 1;
            }
        }
    }

    steps.reverse();
    EditScript { steps }
}

/// Split text on `\n`
///
/// A trailing newline yields an empty last line, so adding or dropping the
/// final newline shows up as an edit. Empty text has no lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').collect()
}

/// Diff two texts line by line
pub fn diff_text(old: &str, new: &str) -> EditScript {
    diff_lines(&split_lines(old), &split_lines(new))
}
