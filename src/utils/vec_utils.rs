/// Replaces every `None` with the most recent preceding `Some`.
/// Leading `None`s (nothing seen yet) are left untouched.
/// Returns how many slots were filled.
pub fn fill_forward_mut<T: Clone>(data: &mut [Option<T>]) -> usize {
    let mut last_value: Option<T> = None;
    let mut total_replaced = 0;

    for item in data.iter_mut() {
        match item {
            Some(value) => last_value = Some(value.clone()),
            None => {
                if let Some(last) = &last_value {
                    *item = Some(last.clone());
                    total_replaced += 1;
                }
            }
        }
    }
    total_replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_gaps_but_not_leading_holes() {
        let mut data = vec![None, Some(1.0), None, None, Some(4.0), None];
        let replaced = fill_forward_mut(&mut data);
        assert_eq!(replaced, 3);
        assert_eq!(data, vec![None, Some(1.0), Some(1.0), Some(1.0), Some(4.0), Some(4.0)]);
    }
}
