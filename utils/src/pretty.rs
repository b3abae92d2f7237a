use itertools::Itertools;
use std::fmt::Display;

/// Lists that render wider than this get one item per line
pub const WIDTH: usize = 80;

/// Renders `[a, b, c]`, or when too wide
///
/// ```text
/// [a,
///  b,
///  c]
/// ```
pub fn pretty_list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    let items: Vec<_> = items.into_iter().map(|item| item.to_string()).collect();
    let single_line = format!("[{}]", items.iter().join(", "));

    if single_line.len() <= WIDTH {
        single_line
    } else {
        format!("[{}]", items.iter().join(",\n "))
    }
}
