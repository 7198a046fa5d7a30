use super::super::domain::ChoiceOption;

/// Scores a capped multi-select on 0..=100 against the best pick possible
/// under the same cap.
///
/// Each option counts once however often its text was selected, and texts
/// that match no option are ignored. A negative raw sum floors at zero.
/// When no option carries a positive weight the group cannot be scored, so
/// any non-negative selection is treated as perfect.
pub fn score_selection<S: AsRef<str>>(
    options: &[ChoiceOption],
    selected: &[S],
    max_select: usize,
) -> f64 {
    let raw: i32 = options
        .iter()
        .filter(|option| selected.iter().any(|text| text.as_ref() == option.text))
        .map(|option| i32::from(option.weight))
        .sum();

    let best = best_achievable(options, max_select);
    if best <= 0 {
        return if raw >= 0 { 100.0 } else { 0.0 };
    }

    (f64::from(raw.max(0)) / f64::from(best) * 100.0).clamp(0.0, 100.0)
}

/// Sum of the `max_select` largest non-negative weights.
pub fn best_achievable(options: &[ChoiceOption], max_select: usize) -> i32 {
    let mut positives: Vec<i32> = options
        .iter()
        .map(|option| i32::from(option.weight.max(0)))
        .collect();
    positives.sort_unstable_by(|a, b| b.cmp(a));
    positives.into_iter().take(max_select).sum()
}
