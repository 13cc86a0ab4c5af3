//! Seats and cyclic seat lookup.
//!
//! Seats are numbered `1..=N`. Every wraparound scan goes through [`SeatRing`], so no
//! caller ever does modulo arithmetic on seat numbers or indexes an empty seat.

use crate::player::{Player, PlayerId};

#[derive(Debug, Clone)]
pub struct Seat {
    index: usize,
    pub(crate) occupant: Option<Player>,
}

impl Seat {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn occupant(&self) -> Option<&Player> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct SeatRing {
    seats: Vec<Seat>,
}

impl SeatRing {
    pub fn new(count: usize) -> Self {
        let seats = (1..=count).map(|index| Seat { index, occupant: None }).collect();
        Self { seats }
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, seat: usize) -> bool {
        (1..=self.seats.len()).contains(&seat)
    }

    pub fn get(&self, seat: usize) -> Option<&Seat> {
        seat.checked_sub(1).and_then(|i| self.seats.get(i))
    }

    pub(crate) fn get_mut(&mut self, seat: usize) -> Option<&mut Seat> {
        seat.checked_sub(1).and_then(|i| self.seats.get_mut(i))
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.get(seat).and_then(Seat::occupant)
    }

    pub(crate) fn player_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.get_mut(seat).and_then(|s| s.occupant.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    /// Occupied seats with their player, in seat order.
    pub fn players(&self) -> impl Iterator<Item = (usize, &Player)> {
        self.seats.iter().filter_map(|s| s.occupant.as_ref().map(|p| (s.index, p)))
    }

    pub(crate) fn players_mut(&mut self) -> impl Iterator<Item = (usize, &mut Player)> {
        self.seats.iter_mut().filter_map(|s| {
            let index = s.index;
            s.occupant.as_mut().map(|p| (index, p))
        })
    }

    pub fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players().find(|(_, p)| p.id() == id).map(|(seat, _)| seat)
    }

    /// Every seat number once, starting just after `from` and ending with `from` itself.
    /// `None` starts at seat 1.
    pub fn order_after(&self, from: Option<usize>) -> impl Iterator<Item = usize> {
        let n = self.seats.len();
        let start = from.filter(|f| self.contains(*f)).unwrap_or(0);
        (1..=n).map(move |step| (start + step - 1) % n + 1)
    }

    fn scan(&self, from: Option<usize>, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        self.order_after(from).find(|&seat| self.player(seat).is_some_and(&pred))
    }

    /// Next seat holding a player who is still in the game (not busted).
    pub fn next_occupied(&self, from: Option<usize>) -> Option<usize> {
        self.scan(from, |p| !p.is_busted())
    }

    /// Next seat whose player can still act this hand: dealt in, not folded, not all-in.
    /// `None` means nobody can act and the betting round is over.
    pub fn next_active(&self, from: Option<usize>) -> Option<usize> {
        self.scan(from, Player::can_act)
    }

    pub fn count_occupied(&self) -> usize {
        self.players().filter(|(_, p)| !p.is_busted()).count()
    }

    pub fn count_active(&self) -> usize {
        self.players().filter(|(_, p)| p.can_act()).count()
    }

    /// Seats still contesting the pot (dealt in and not folded).
    pub fn contenders(&self) -> Vec<usize> {
        self.players().filter(|(_, p)| p.is_contending()).map(|(s, _)| s).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HoleCards;

    fn dealt(id: &str, hole: &str) -> Player {
        let mut p = Player::new(id, id, 100);
        p.hole = Some(hole.parse::<HoleCards>().unwrap());
        p
    }

    /// Seats: [A(folded), B, C(empty), D]
    fn ring() -> SeatRing {
        let mut r = SeatRing::new(4);
        let mut a = dealt("A", "2c 3c");
        a.folded = true;
        r.get_mut(1).unwrap().occupant = Some(a);
        r.get_mut(2).unwrap().occupant = Some(dealt("B", "4c 5c"));
        r.get_mut(4).unwrap().occupant = Some(dealt("D", "6c 7c"));
        r
    }

    #[test]
    fn next_active_skips_folded_and_empty() {
        let r = ring();
        assert_eq!(r.next_active(Some(1)), Some(2));
        assert_eq!(r.next_active(Some(2)), Some(4));
        assert_eq!(r.next_active(Some(4)), Some(2));
        assert_eq!(r.next_active(None), Some(2));
    }

    #[test]
    fn next_occupied_ignores_fold_state() {
        let r = ring();
        assert_eq!(r.next_occupied(Some(4)), Some(1));
        assert_eq!(r.next_occupied(Some(2)), Some(4));
        assert_eq!(r.next_occupied(None), Some(1));
    }

    #[test]
    fn busted_and_all_in_seats_are_skipped() {
        let mut r = ring();
        r.player_mut(2).unwrap().all_in = true;
        assert_eq!(r.next_active(Some(1)), Some(4));
        r.player_mut(1).unwrap().busted = true;
        assert_eq!(r.next_occupied(Some(4)), Some(2));
    }

    #[test]
    fn empty_ring_finds_nothing() {
        let r = SeatRing::new(3);
        assert_eq!(r.next_occupied(None), None);
        assert_eq!(r.next_active(Some(2)), None);
    }

    #[test]
    fn order_wraps_and_ends_at_origin() {
        let r = SeatRing::new(4);
        assert_eq!(r.order_after(Some(3)).collect::<Vec<_>>(), vec![4, 1, 2, 3]);
        assert_eq!(r.order_after(None).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn lone_active_seat_finds_itself() {
        let mut r = ring();
        r.player_mut(4).unwrap().folded = true;
        assert_eq!(r.next_active(Some(2)), Some(2));
        assert_eq!(r.count_active(), 1);
        assert_eq!(r.contenders(), vec![2]);
    }
}
