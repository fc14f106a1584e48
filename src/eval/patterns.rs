//! Shape classification over 9-cell line windows
//!
//! A window is the pivot cell plus four cells on each side along one
//! direction. Every cell reads as own stone, empty, or blocked; the board
//! edge and an opposing stone are the same thing to the classifier.
//!
//! Classification is a table lookup: all 3^9 windows are classified once by
//! matching fixed templates, most specific first, and the result is stored in
//! a lazily built table.

use std::sync::LazyLock;

use crate::board::{Board, Direction, Pos, Stone};

/// Index of the pivot inside a window
pub const PIVOT: usize = 4;
pub const WINDOW_LEN: usize = 9;

/// One cell of a line window, seen from one color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCell {
    Own,
    Empty,
    Blocked,
}

pub type Window = [LineCell; WINDOW_LEN];

/// Canonical line shapes, weakest first so `Ord` follows strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeTag {
    None,
    LiveOne,
    DeadTwo,
    LiveTwo,
    DeadThree,
    LiveThree,
    DeadFour,
    LiveFour,
    Five,
}

/// Score table. Live forms score at least 10x the dead form of the same length.
pub struct PatternScore;

impl PatternScore {
    pub const FIVE: i32 = 100_000;
    /// `_OOOO_`: two ways to make five
    pub const LIVE_FOUR: i32 = 20_000;
    /// One way to make five
    pub const DEAD_FOUR: i32 = 2_000;
    pub const LIVE_THREE: i32 = 1_000;
    pub const DEAD_THREE: i32 = 100;
    pub const LIVE_TWO: i32 = 50;
    pub const DEAD_TWO: i32 = 5;
    pub const LIVE_ONE: i32 = 1;
}

impl ShapeTag {
    #[inline]
    #[must_use]
    pub fn score(self) -> i32 {
        match self {
            ShapeTag::Five => PatternScore::FIVE,
            ShapeTag::LiveFour => PatternScore::LIVE_FOUR,
            ShapeTag::DeadFour => PatternScore::DEAD_FOUR,
            ShapeTag::LiveThree => PatternScore::LIVE_THREE,
            ShapeTag::DeadThree => PatternScore::DEAD_THREE,
            ShapeTag::LiveTwo => PatternScore::LIVE_TWO,
            ShapeTag::DeadTwo => PatternScore::DEAD_TWO,
            ShapeTag::LiveOne => PatternScore::LIVE_ONE,
            ShapeTag::None => 0,
        }
    }

    /// Live or dead four
    #[inline]
    pub fn is_four(self) -> bool {
        matches!(self, ShapeTag::LiveFour | ShapeTag::DeadFour)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeTag::Five => "five",
            ShapeTag::LiveFour => "live four",
            ShapeTag::DeadFour => "dead four",
            ShapeTag::LiveThree => "live three",
            ShapeTag::DeadThree => "dead three",
            ShapeTag::LiveTwo => "live two",
            ShapeTag::DeadTwo => "dead two",
            ShapeTag::LiveOne => "live one",
            ShapeTag::None => "none",
        }
    }
}

// Templates: 'O' own stone, '_' empty, 'X' blocked.
const FIVE: &[&[u8]] = &[b"OOOOO"];
const LIVE_FOUR: &[&[u8]] = &[b"_OOOO_"];
const DEAD_FOUR: &[&[u8]] = &[b"XOOOO_", b"_OOOOX", b"OOO_O", b"O_OOO", b"OO_OO"];
const LIVE_THREE: &[&[u8]] = &[b"_OOO__", b"__OOO_", b"_O_OO_", b"_OO_O_"];
const DEAD_THREE: &[&[u8]] = &[
    b"XOOO_", b"_OOOX", b"_OOO_", b"OO_O", b"O_OO", b"OO__O", b"O__OO", b"O_O_O",
];
const LIVE_TWO: &[&[u8]] = &[b"_OO_", b"_O_O_"];
const DEAD_TWO: &[&[u8]] = &[b"XOO_", b"_OOX"];
const LIVE_ONE: &[&[u8]] = &[b"_O_"];

/// Read the window through `pos` for `color`. The pivot is read from the board.
pub fn window_at(board: &Board, pos: Pos, dir: Direction, color: Stone) -> Window {
    let (dr, dc) = dir.delta();
    let mut window = [LineCell::Blocked; WINDOW_LEN];
    for (i, cell) in window.iter_mut().enumerate() {
        let k = i as i32 - PIVOT as i32;
        *cell = match pos.offset(dr * k, dc * k) {
            Some(p) => match board.get(p) {
                Stone::Empty => LineCell::Empty,
                s if s == color => LineCell::Own,
                _ => LineCell::Blocked,
            },
            None => LineCell::Blocked,
        };
    }
    window
}

/// Window through `pos` as if `color` had just played there.
#[inline]
pub fn window_placed(board: &Board, pos: Pos, dir: Direction, color: Stone) -> Window {
    let mut window = window_at(board, pos, dir, color);
    window[PIVOT] = LineCell::Own;
    window
}

/// Classify a window. Only shapes that contain the pivot stone count.
#[inline]
#[must_use]
pub fn classify(window: &Window) -> ShapeTag {
    SHAPE_TABLE[window_index(window)]
}

/// Classify the line through `pos` in `dir` with `color` placed at `pos`.
#[inline]
pub fn shape_at(board: &Board, pos: Pos, dir: Direction, color: Stone) -> ShapeTag {
    classify(&window_placed(board, pos, dir, color))
}

static SHAPE_TABLE: LazyLock<Vec<ShapeTag>> = LazyLock::new(|| {
    (0..3usize.pow(WINDOW_LEN as u32))
        .map(|idx| classify_uncached(&window_from_index(idx)))
        .collect()
});

fn window_index(window: &Window) -> usize {
    window.iter().fold(0, |acc, cell| {
        acc * 3
            + match cell {
                LineCell::Empty => 0,
                LineCell::Own => 1,
                LineCell::Blocked => 2,
            }
    })
}

fn window_from_index(mut idx: usize) -> Window {
    let mut window = [LineCell::Empty; WINDOW_LEN];
    for cell in window.iter_mut().rev() {
        *cell = match idx % 3 {
            0 => LineCell::Empty,
            1 => LineCell::Own,
            _ => LineCell::Blocked,
        };
        idx /= 3;
    }
    window
}

fn classify_uncached(window: &Window) -> ShapeTag {
    if window[PIVOT] != LineCell::Own {
        return ShapeTag::None;
    }
    if matches_any(window, FIVE) {
        return ShapeTag::Five;
    }
    // A line segment too short to ever hold five is worth nothing.
    if open_span(window) < 5 {
        return ShapeTag::None;
    }
    if let Some(four) = classify_four(window) {
        return four;
    }
    if matches_any(window, LIVE_THREE) && is_live_three(window) {
        return ShapeTag::LiveThree;
    }
    if (matches_any(window, LIVE_THREE) || matches_any(window, DEAD_THREE))
        && four_fills(window).0 > 0
    {
        return ShapeTag::DeadThree;
    }
    if matches_any(window, LIVE_TWO) {
        return ShapeTag::LiveTwo;
    }
    if matches_any(window, DEAD_TWO) {
        return ShapeTag::DeadTwo;
    }
    if matches_any(window, LIVE_ONE) {
        return ShapeTag::LiveOne;
    }
    ShapeTag::None
}

fn classify_four(window: &Window) -> Option<ShapeTag> {
    if matches_any(window, LIVE_FOUR) {
        Some(ShapeTag::LiveFour)
    } else if matches_any(window, DEAD_FOUR) {
        Some(ShapeTag::DeadFour)
    } else {
        None
    }
}

/// A three is live only if one fill makes `_OOOO_` and at least two different
/// fills make some four. String shape alone is not enough.
fn is_live_three(window: &Window) -> bool {
    let (fours, live) = four_fills(window);
    live && fours >= 2
}

/// Try every empty cell: count fills that make a four through the pivot, and
/// report whether any of them is a live four.
fn four_fills(window: &Window) -> (usize, bool) {
    let mut fours = 0;
    let mut live = false;
    for i in 0..WINDOW_LEN {
        if window[i] != LineCell::Empty {
            continue;
        }
        let mut filled = *window;
        filled[i] = LineCell::Own;
        if matches_any(&filled, FIVE) {
            continue;
        }
        match classify_four(&filled) {
            Some(ShapeTag::LiveFour) => {
                fours += 1;
                live = true;
            }
            Some(_) => fours += 1,
            None => {}
        }
    }
    (fours, live)
}

/// Length of the unblocked stretch containing the pivot
fn open_span(window: &Window) -> usize {
    let left = window[..PIVOT]
        .iter()
        .rev()
        .take_while(|&&c| c != LineCell::Blocked)
        .count();
    let right = window[PIVOT + 1..]
        .iter()
        .take_while(|&&c| c != LineCell::Blocked)
        .count();
    left + right + 1
}

fn matches_any(window: &Window, templates: &[&[u8]]) -> bool {
    templates.iter().any(|t| matches_template(window, t))
}

/// True if `template` matches at some offset with an 'O' on the pivot.
fn matches_template(window: &Window, template: &[u8]) -> bool {
    let len = template.len();
    let first = (PIVOT + 1).saturating_sub(len);
    let last = PIVOT.min(WINDOW_LEN - len);
    (first..=last).any(|start| {
        template[PIVOT - start] == b'O'
            && template.iter().enumerate().all(|(i, &t)| {
                let cell = window[start + i];
                match t {
                    b'O' => cell == LineCell::Own,
                    b'_' => cell == LineCell::Empty,
                    _ => cell == LineCell::Blocked,
                }
            })
    })
}
