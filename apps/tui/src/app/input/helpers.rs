/// Moves `index` by `step` inside `0..len`, wrapping at both ends.
pub fn cycle(index: usize, len: usize, step: isize) -> usize {
    if len == 0 {
        return 0;
    }
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    let next = (index as isize + step).rem_euclid(len as isize) as usize;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_wrap_both_ways() {
        assert_eq!(cycle(3, 4, 1), 0);
        assert_eq!(cycle(0, 4, -1), 3);
        assert_eq!(cycle(1, 4, 1), 2);
        assert_eq!(cycle(0, 0, -1), 0);
    }
}
