//! Name normalization used as the matching key

/// Normalize a player name for comparison.
///
/// Newlines become spaces, runs of spaces collapse to one, surrounding
/// whitespace is trimmed and the result is lowercased. Applying it twice
/// gives the same result as applying it once.
pub fn normalize_name(name: &str) -> String {
    let flat = name.replace('\n', " ");
    let mut out = String::with_capacity(flat.len());
    let mut prev_space = false;

    for c in flat.trim().chars() {
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }

    out.to_lowercase()
}

/// Number of leading chars two strings share
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
