//! Side-by-side windowgram patterns.
//!
//! A pattern is a single string holding one or more windowgrams packed
//! left-to-right with whitespace padding. Column runs are anchored to the
//! first line of each batch, so differently sized windowgrams can sit next
//! to each other; a blank line starts a new batch. Test suites and demo
//! output use patterns to show a progression of layouts compactly.

/// One whitespace-delimited run of characters with its starting column.
fn column_runs(line: &str) -> Vec<(String, Option<usize>)> {
    let mut runs: Vec<(String, Option<usize>)> = Vec::new();
    for (col, ch) in line.chars().enumerate() {
        if ch == ' ' || ch == '\t' || runs.is_empty() {
            let need_new = runs.last().is_none_or(|run| !run.0.is_empty());
            if need_new {
                runs.push((String::new(), None));
            }
        }
        if ch != ' ' && ch != '\t' {
            if let Some(run) = runs.last_mut() {
                if run.1.is_none() {
                    run.1 = Some(col);
                }
                run.0.push(ch);
            }
        }
    }
    runs
}

/// Split a packed pattern into windowgram strings.
///
/// Runs at columns the batch's first line does not define are dropped, and
/// missing columns come through as blank lines, so a carelessly edited
/// pattern loses data rather than corrupting its neighbors.
#[must_use]
pub fn pattern_to_list(pattern: &str) -> Vec<String> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut first: Vec<(String, Option<usize>)> = Vec::new();
    for line in pattern.split('\n') {
        if line.trim().is_empty() {
            first.clear();
            continue;
        }
        let mut runs = column_runs(line);
        if !first.is_empty() {
            runs.retain(|(_, col)| first.iter().any(|(_, fcol)| fcol == col));
            for (ix, (_, fcol)) in first.iter().enumerate() {
                if !runs.iter().any(|(_, col)| col == fcol) {
                    runs.insert(ix, (String::new(), *fcol));
                }
            }
        }
        if first.is_empty() {
            first = runs.clone();
            for _ in 0..first.len() {
                groups.push(Vec::new());
            }
        }
        runs.truncate(first.len());
        let total = groups.len();
        let count = first.len();
        for (n, (run, _)) in runs.into_iter().enumerate() {
            groups[total - (count - n)].push(run);
        }
    }
    groups
        .into_iter()
        .map(|lines| {
            let kept: Vec<String> = lines.into_iter().filter(|line| !line.is_empty()).collect();
            format!("{}\n", kept.join("\n"))
        })
        .collect()
}

/// Pack windowgram strings into a pattern under a width budget.
///
/// Windowgrams flow left-to-right separated by `mpad` spaces, each row of the
/// pattern indented by `lpad`; a batch that would exceed `max_width` wraps to
/// a new row separated by a blank line. Trailing spaces are stripped.
#[must_use]
pub fn list_to_pattern(windowgrams: &[String], max_width: usize, lpad: usize, mpad: usize) -> String {
    let mut line_arr: Vec<Vec<String>> = Vec::new();
    let mut width_arr: Vec<usize> = Vec::new();
    for wg in windowgrams {
        let lines: Vec<String> = wg
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        line_arr.push(lines);
        width_arr.push(width);
    }
    let mut pattern = String::new();
    let mut spent = 0;
    while spent < width_arr.len() {
        // How many of the remaining windowgrams fit on this pattern row.
        let mut row_len = lpad + width_arr[spent];
        let spending = spent;
        spent += 1;
        while spent < width_arr.len() {
            row_len += mpad + width_arr[spent];
            if row_len > max_width {
                break;
            }
            spent += 1;
        }
        if !pattern.is_empty() {
            pattern.push('\n');
        }
        let batch = &line_arr[spending..spent];
        let height = batch.iter().map(Vec::len).max().unwrap_or(0);
        for ix in 0..height {
            let row: Vec<String> = batch
                .iter()
                .enumerate()
                .map(|(ix2, lines)| {
                    let mut cell = lines.get(ix).cloned().unwrap_or_else(|| " ".to_string());
                    while cell.chars().count() < width_arr[spending + ix2] {
                        cell.push(' ');
                    }
                    cell
                })
                .collect();
            pattern.push_str(&" ".repeat(lpad));
            pattern.push_str(&row.join(&" ".repeat(mpad)));
            pattern.push('\n');
        }
    }
    let stripped: Vec<&str> = pattern.split('\n').map(str::trim_end).collect();
    stripped.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_to_list_basic_height_difference() {
        let pattern = "\n            1 2\n              2\n        ";
        assert_eq!(pattern_to_list(pattern), vec!["1\n", "2\n2\n"]);
    }

    #[test]
    fn pattern_to_list_keeps_mask_symbols() {
        let pattern = "\n            1.. ...\n            ... ..2\n        ";
        assert_eq!(pattern_to_list(pattern), vec!["1..\n...\n", "...\n..2\n"]);
    }

    #[test]
    fn pattern_to_list_drops_out_of_bounds_runs() {
        let pattern = concat!(
            "\n",
            "            1 22 33 aa bb  XX Y ZZ\n",
            "            1 22    aa bb     Y    0\n",
            "            1          bb          0\n",
            "                       bbb\n",
            "        ",
        );
        assert_eq!(
            pattern_to_list(pattern),
            vec!["1\n1\n1\n", "22\n22\n", "33\n", "aa\naa\n", "bb\nbb\nbb\nbbb\n", "XX\n", "Y\nY\n", "ZZ\n"]
        );
    }

    #[test]
    fn pattern_to_list_clips_misaligned_lines() {
        let pattern = concat!(
            "\n",
            "            111  222  333\n",
            "            111   222 333\n",
            "            111\n",
            "        ",
        );
        assert_eq!(pattern_to_list(pattern), vec!["111\n111\n111\n", "222\n", "333\n333\n"]);
    }

    #[test]
    fn list_to_pattern_pads_heights() {
        let list = vec!["1\n".to_string(), "2\n2\n".to_string()];
        assert_eq!(list_to_pattern(&list, 32, 12, 1), "            1 2\n              2\n");
    }

    #[test]
    fn list_to_pattern_wraps_on_width_budget() {
        let list = vec!["11\n11\n".to_string(), "22\n".to_string()];
        assert_eq!(list_to_pattern(&list, 4, 0, 1), "11\n11\n\n22\n");
    }

    #[test]
    fn pattern_round_trip() {
        let list = vec!["ab\nab\n".to_string(), "c\n".to_string(), "dd\n".to_string()];
        let pattern = list_to_pattern(&list, 40, 4, 2);
        assert_eq!(pattern_to_list(&pattern), list);
    }
}
