use crate::cards::{Card, Rank, Suit};

/// Facts about one five-card hand, computed once and read by every category rule.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// High rank first; suit breaks ties so the order is total.
    pub cards: [Card; 5],
    /// (rank, copies), most copies first, then higher rank.
    pub groups: Vec<(Rank, u8)>,
    pub flush: Option<Suit>,
    /// Top of the straight, Five for A-2-3-4-5.
    pub straight_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted = *cards;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let ranks = sorted.map(Card::rank);
        Self {
            cards: sorted,
            groups: rank_groups(&ranks),
            flush: flush_suit(&sorted),
            straight_top: straight_top(&ranks),
        }
    }

    /// Group sizes, largest first: `[3, 2]` for a full house.
    pub fn shape(&self) -> Vec<u8> {
        self.groups.iter().map(|&(_, n)| n).collect()
    }

    /// How many groups hold exactly `n` cards.
    pub fn groups_of(&self, n: u8) -> usize {
        self.groups.iter().filter(|&&(_, count)| count == n).count()
    }

    fn copies(&self, rank: Rank) -> u8 {
        self.groups.iter().find(|&&(r, _)| r == rank).map_or(0, |&(_, n)| n)
    }

    /// Bigger groups first, then rank: `KKK77`, `JJ994`, `9 9 A K 2`.
    pub fn by_groups(&self) -> [Card; 5] {
        let mut out = self.cards;
        out.sort_by(|a, b| {
            (self.copies(b.rank()), b.rank(), b.suit()).cmp(&(self.copies(a.rank()), a.rank(), a.suit()))
        });
        out
    }

    /// Straight order from the top card down; the ace of a wheel plays last.
    pub fn by_straight(&self) -> [Card; 5] {
        let mut out = self.cards;
        if self.straight_top == Some(Rank::Five) {
            out.rotate_left(1);
        }
        out
    }
}

fn rank_groups(ranks: &[Rank; 5]) -> Vec<(Rank, u8)> {
    let mut groups: Vec<(Rank, u8)> = Vec::with_capacity(5);
    // ranks arrive sorted, so equal ranks are adjacent
    for &rank in ranks {
        match groups.last_mut() {
            Some((r, n)) if *r == rank => *n += 1,
            _ => groups.push((rank, 1)),
        }
    }
    groups.sort_by(|a, b| (b.1, b.0).cmp(&(a.1, a.0)));
    groups
}

fn flush_suit(cards: &[Card; 5]) -> Option<Suit> {
    let suit = cards[0].suit();
    cards.iter().all(|c| c.suit() == suit).then_some(suit)
}

/// Expects ranks high to low.
fn straight_top(ranks: &[Rank; 5]) -> Option<Rank> {
    if ranks.windows(2).all(|w| w[0].value() == w[1].value() + 1) {
        return Some(ranks[0]);
    }
    // the ace plays low only in the wheel
    (*ranks == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two]).then_some(Rank::Five)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn analyze(s: &str) -> HandAnalysis {
        let v = parse_cards(s).unwrap();
        HandAnalysis::new(&[v[0], v[1], v[2], v[3], v[4]])
    }

    fn ranks(cards: [Card; 5]) -> Vec<char> {
        cards.iter().map(|c| c.rank().to_char()).collect()
    }

    #[test]
    fn royal_flush_facts() {
        let a = analyze("Ts Js Ks As Qs");
        assert_eq!(a.flush, Some(Suit::Spades));
        assert_eq!(a.straight_top, Some(Rank::Ace));
        assert_eq!(a.shape(), vec![1, 1, 1, 1, 1]);
        assert_eq!(ranks(a.cards), vec!['A', 'K', 'Q', 'J', 'T']);
    }

    #[test]
    fn one_off_suit_is_no_flush() {
        assert_eq!(analyze("As Kh Qs Js 9s").flush, None);
    }

    #[test]
    fn straights() {
        assert_eq!(analyze("9c Kd Th Js Qc").straight_top, Some(Rank::King));
        assert_eq!(analyze("Ac 2d 3h 4s 5c").straight_top, Some(Rank::Five));
        assert_eq!(analyze("Qc Kd Ah 2s 3c").straight_top, None, "no wrap-around");
        assert_eq!(analyze("Ac Ad Kh Qs Jc").straight_top, None);
    }

    #[test]
    fn groups_order_by_size_then_rank() {
        let a = analyze("2c Kd 2h Ks Kc");
        assert_eq!(a.groups, vec![(Rank::King, 3), (Rank::Two, 2)]);
        assert_eq!(a.groups_of(3), 1);

        let a = analyze("4c Jd 4h Js Ad");
        assert_eq!(a.shape(), vec![2, 2, 1]);
        assert_eq!(a.groups_of(2), 2);
        assert_eq!(ranks(a.by_groups()), vec!['J', 'J', '4', '4', 'A']);
    }

    #[test]
    fn wheel_puts_the_ace_last() {
        let a = analyze("Ac 2d 3h 4s 5c");
        assert_eq!(ranks(a.by_straight()), vec!['5', '4', '3', '2', 'A']);
    }
}
