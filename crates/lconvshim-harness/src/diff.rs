//! Diff rendering for fixture comparison.

/// Render a line diff between expected and actual output.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::from("--- expected\n+++ actual\n");
    let exp: Vec<&str> = expected.lines().collect();
    let act: Vec<&str> = actual.lines().collect();
    let len = exp.len().max(act.len()).max(1);
    for i in 0..len {
        let e = exp.get(i).copied().unwrap_or("");
        let a = act.get(i).copied().unwrap_or("");
        if e != a {
            out.push_str(&format!("@@ line {} @@\n-{e}\n+{a}\n", i + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs() {
        assert_eq!(render_diff("C", "C"), "[identical]");
    }

    #[test]
    fn single_line_mismatch() {
        let d = render_diff("C", "NULL");
        assert!(d.contains("-C\n"));
        assert!(d.contains("+NULL\n"));
    }

    #[test]
    fn empty_expected_shows_actual() {
        let d = render_diff("", ".");
        assert!(d.contains("+.\n"), "{d}");
    }
}
