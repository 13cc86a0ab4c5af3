/// Every choice of five indices out of `0..n`, each yielded in ascending order.
///
/// Walks bitmasks over `n` bits and keeps those with five bits set, so a seven-card input
/// yields its 21 subsets and anything under five cards yields none.
pub struct FiveCardSubsets {
    n: usize,
    mask: u32,
}

impl FiveCardSubsets {
    pub fn new(n: usize) -> Self {
        debug_assert!(n < 32);
        Self { n, mask: 0 }
    }
}

impl Iterator for FiveCardSubsets {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        let end = 1u32 << self.n;
        while self.mask < end {
            let mask = self.mask;
            self.mask += 1;
            if mask.count_ones() != 5 {
                continue;
            }
            let mut out = [0; 5];
            let picked = (0..self.n).filter(|i| mask & (1 << i) != 0);
            for (slot, i) in out.iter_mut().zip(picked) {
                *slot = i;
            }
            return Some(out);
        }
        None
    }
}
