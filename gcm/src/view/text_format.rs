//! Text fitting helpers for the render loop.
//!
//! Every line is padded to exactly `width` with trailing spaces even when
//! it's shorter: the render loop overwrites the previous frame in place
//! via cursor-up rather than clearing lines first, so a shorter new line
//! must blank out whatever longer text used to occupy the rest of it.

/// Truncates the *front* of each line, keeping the tail and prefixing a
/// `...` marker, so the line is never longer than `width`. Used for the
/// clone-root path, where the interesting part is the end.
pub fn truncate_front_to_width(width: usize, text: &str) -> String {
    fit_lines(width, text, |chars, width| {
        if width > 3 {
            let tail_len = width - 3;
            let start = chars.len() - tail_len;
            format!("...{}", chars[start..].iter().collect::<String>())
        } else {
            let start = chars.len() - width;
            chars[start..].iter().collect()
        }
    })
}

/// Truncates the *back* of each line, keeping the head. Used for the host
/// name, where the interesting part is the start.
pub fn truncate_back_to_width(width: usize, text: &str) -> String {
    fit_lines(width, text, |chars, width| chars[..width].iter().collect())
}

fn fit_lines(width: usize, text: &str, shorten: impl Fn(&[char], usize) -> String) -> String {
    text.split('\n')
        .map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() > width {
                shorten(&chars, width)
            } else {
                format!("{line:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapses a leading home-directory prefix to `~`, for display only.
pub fn collapse_home_dir(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    if !home.is_empty() {
        if let Some(rest) = path.strip_prefix(home.as_ref()) {
            return format!("~{rest}");
        }
    }
    path.to_string()
}
