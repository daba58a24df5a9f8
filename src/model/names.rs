// Canonical cursor role table and fuzzy name resolution.

use std::collections::HashMap;

/// One canonical cursor role: a preferred name plus every synonym that
/// denotes the same semantic cursor across platforms and conventions.
/// `name` is always one of `members`.
pub struct CursorRole {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

/// Result of matching an arbitrary candidate against the role table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub known: bool,
}

/// Similarity scores must strictly exceed this to count as a match.
const MATCH_THRESHOLD: f64 = 0.5;

/// Table order is part of the resolution contract: on equal top scores
/// the first-declared member wins. Member order within a group mirrors
/// the historical cursor database.
pub static CURSOR_ROLES: &[CursorRole] = &[
    CursorRole { name: "X_cursor", members: &["X_cursor", "pirate", "x-cursor"] },
    CursorRole { name: "all-scroll", members: &["all-scroll", "fleur", "size_all"] },
    CursorRole {
        name: "bd_double_arrow",
        members: &[
            "bd_double_arrow",
            "c7088f0f3e6c8088236ef8e1e3e70000",
            "nwse-resize",
            "size_fdiag",
        ],
    },
    CursorRole { name: "bottom_left_corner", members: &["bottom_left_corner", "sw-resize"] },
    CursorRole { name: "bottom_right_corner", members: &["bottom_right_corner", "se-resize"] },
    CursorRole { name: "bottom_side", members: &["bottom_side", "s-resize"] },
    CursorRole { name: "bottom_tee", members: &["bottom_tee"] },
    CursorRole { name: "center_ptr", members: &["center_ptr"] },
    CursorRole { name: "circle", members: &["circle", "forbidden"] },
    CursorRole { name: "context-menu", members: &["context-menu"] },
    CursorRole {
        name: "copy",
        members: &[
            "1081e37283d90000800003c07f3ef6bf",
            "6407b0e94181790501fd1e167b474872",
            "b66166c04f8c3109214a4fbd64a50fc8",
            "copy",
        ],
    },
    CursorRole { name: "cross", members: &["cross", "cross_reverse", "diamond_cross"] },
    CursorRole {
        name: "crossed_circle",
        members: &["crossed_circle", "03b6e0fcb3499374a867c041f52298f0", "not-allowed"],
    },
    CursorRole { name: "crosshair", members: &["crosshair"] },
    CursorRole { name: "dnd-ask", members: &["dnd-ask"] },
    CursorRole { name: "dnd-copy", members: &["dnd-copy"] },
    CursorRole { name: "dnd-link", members: &["dnd-link", "alias"] },
    CursorRole { name: "dnd-move", members: &["dnd-move"] },
    CursorRole {
        name: "dnd-none",
        members: &["dnd-none", "closedhand", "fcf21c00b30f7e3f83fe0dfd12e71cff"],
    },
    CursorRole { name: "dnd_no_drop", members: &["dnd_no_drop", "no-drop"] },
    CursorRole {
        name: "dotbox",
        members: &["dotbox", "dot_box_mask", "draped_box", "icon", "target"],
    },
    CursorRole {
        name: "fd_double_arrow",
        members: &[
            "fcf1c3c7cd4491d801f1e1c78f100000",
            "fd_double_arrow",
            "nesw-resize",
            "size_bdiag",
        ],
    },
    CursorRole { name: "grabbing", members: &["grabbing"] },
    CursorRole { name: "hand", members: &["hand"] },
    CursorRole { name: "hand1", members: &["hand1", "grab", "openhand"] },
    CursorRole {
        name: "hand2",
        members: &[
            "9d800788f1b08800ae810202380a0822",
            "e29285e634086352946a0e7090d73106",
            "hand2",
            "pointer",
            "pointing_hand",
        ],
    },
    CursorRole { name: "left_ptr", members: &["left_ptr", "arrow", "default"] },
    CursorRole {
        name: "left_ptr_watch",
        members: &[
            "00000000000000020006000e7e9ffc3f",
            "08e8e1c95fe2fc01f976f1e063a24ccd",
            "3ecb610c1bf2410f44200f48c40d3599",
            "left_ptr_watch",
            "progress",
        ],
    },
    CursorRole { name: "left_side", members: &["left_side", "w-resize"] },
    CursorRole { name: "left_tee", members: &["left_tee"] },
    CursorRole {
        name: "link",
        members: &[
            "3085a0e285430894940527032f8b26df",
            "640fb0e74195791501fd1ed57b41487f",
            "a2a266d0498c3104214a47bd64ab0fc8",
            "link",
        ],
    },
    CursorRole { name: "ll_angle", members: &["ll_angle"] },
    CursorRole { name: "lr_angle", members: &["lr_angle"] },
    CursorRole {
        name: "move",
        members: &[
            "4498f0e0c1937ffe01fd06f973665830",
            "9081237383d90e509aa00f00170e968f",
            "move",
        ],
    },
    CursorRole { name: "pencil", members: &["pencil", "draft"] },
    CursorRole { name: "plus", members: &["plus", "cell"] },
    CursorRole { name: "pointer-move", members: &["pointer-move"] },
    CursorRole {
        name: "help",
        members: &[
            "5c6cd98b3f3ebcb1f9c7f1c204630408",
            "d9ce0ab605698f320427677b458ad60b",
            "help",
            "left_ptr_help",
            "question_arrow",
            "whats_this",
        ],
    },
    CursorRole { name: "right_ptr", members: &["right_ptr", "draft_large", "draft_small"] },
    CursorRole { name: "right_side", members: &["right_side", "e-resize"] },
    CursorRole { name: "right_tee", members: &["right_tee"] },
    CursorRole { name: "sb_down_arrow", members: &["sb_down_arrow", "down-arrow"] },
    CursorRole {
        name: "sb_h_double_arrow",
        members: &[
            "028006030e0e7ebffc7f7070c0600140",
            "14fef782d02440884392942c1120523",
            "col-resize",
            "ew-resize",
            "h_double_arrow",
            "sb_h_double_arrow",
            "size-hor",
            "size_hor",
            "split_h",
        ],
    },
    CursorRole { name: "sb_left_arrow", members: &["sb_left_arrow", "left-arrow"] },
    CursorRole { name: "sb_right_arrow", members: &["sb_right_arrow", "right-arrow"] },
    CursorRole { name: "sb_up_arrow", members: &["sb_up_arrow", "up-arrow"] },
    CursorRole {
        name: "sb_v_double_arrow",
        members: &[
            "00008160000006810000408080010102",
            "2870a09082c103050810ffdffffe0204",
            "double_arrow",
            "ns-resize",
            "row-resize",
            "sb_v_double_arrow",
            "size-ver",
            "size_ver",
            "split_v",
            "v_double_arrow",
        ],
    },
    CursorRole { name: "tcross", members: &["tcross", "color-picker"] },
    CursorRole { name: "top_left_corner", members: &["top_left_corner", "nw-resize"] },
    CursorRole { name: "top_right_corner", members: &["top_right_corner", "ne-resize"] },
    CursorRole { name: "top_side", members: &["top_side", "n-resize"] },
    CursorRole { name: "top_tee", members: &["top_tee"] },
    CursorRole { name: "ul_angle", members: &["ul_angle"] },
    CursorRole { name: "ur_angle", members: &["ur_angle"] },
    CursorRole { name: "vertical-text", members: &["vertical-text"] },
    CursorRole { name: "watch", members: &["watch", "wait"] },
    CursorRole { name: "wayland-cursor", members: &["wayland-cursor"] },
    CursorRole { name: "xterm", members: &["xterm", "text", "ibeam"] },
    CursorRole { name: "zoom-in", members: &["zoom-in"] },
    CursorRole { name: "zoom-out", members: &["zoom-out"] },
];

/// Maps an arbitrary candidate name onto a canonical role via
/// case-insensitive fuzzy matching over the flattened table. Candidates
/// that beat no member by more than the threshold come back unchanged
/// with `known = false`; callers warn, they never abort.
pub fn resolve(candidate: &str) -> Resolution {
    let needle = candidate.to_lowercase();
    let mut best = MATCH_THRESHOLD;
    let mut winner: Option<&CursorRole> = None;

    for role in CURSOR_ROLES {
        for member in role.members {
            let score = similarity(&needle, &member.to_lowercase());
            if score > best {
                best = score;
                winner = Some(role);
            }
        }
    }

    match winner {
        Some(role) => Resolution {
            name: role.name.to_string(),
            known: true,
        },
        None => Resolution {
            name: candidate.to_string(),
            known: false,
        },
    }
}

/// Every other name sharing a role with `name`, in table order. Empty
/// if `name` is not in the table.
pub fn aliases_of(name: &str) -> Vec<&'static str> {
    for role in CURSOR_ROLES {
        if role.members.contains(&name) {
            return role
                .members
                .iter()
                .copied()
                .filter(|m| *m != name)
                .collect();
        }
    }
    Vec::new()
}

/// Ratcliff/Obershelp similarity: twice the number of characters in
/// recursively longest matching blocks over the total length.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matches = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size > 0 {
            matches += size;
            pending.push((alo, i, blo, j));
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matches
}

/// Longest block with a[i..i+size] == b[j..j+size] inside the given
/// ranges, preferring the earliest block on equal lengths.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate().take(bhi).skip(blo) {
        positions.entry(c).or_default().push(j);
    }

    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, &c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_runs: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = positions.get(&c) {
            for &j in js {
                let run = if j > blo {
                    run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_runs.insert(j, run);
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
            }
        }
        run_lengths = next_runs;
    }

    (best_i, best_j, best_size)
}
