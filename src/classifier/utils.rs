/// Index and value of the largest element. The first maximum wins, so ties
/// resolve to the lowest class index.
pub(crate) fn argmax(values: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &value) in values.iter().enumerate() {
        let better = match best {
            Some((_, best_value)) => value > best_value,
            None => true,
        };
        if better {
            best = Some((index, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_largest_value() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some((1, 0.7)));
    }

    #[test]
    fn ties_resolve_to_the_lowest_index() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some((1, 0.4)));
    }

    #[test]
    fn single_element_wins() {
        assert_eq!(argmax(&[0.5]), Some((0, 0.5)));
    }

    #[test]
    fn empty_input_has_no_maximum() {
        assert_eq!(argmax(&[]), None);
    }
}
