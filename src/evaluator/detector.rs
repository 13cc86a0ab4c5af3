use super::hand_analysis::HandAnalysis;
use crate::cards::{Card, Rank};
use crate::evaluator::{Category, EvaluatedHand};

/// How one category is recognised and how its cards are ordered for tie-breaks.
pub struct Rule {
    pub category: Category,
    matches: fn(&HandAnalysis) -> bool,
    order: fn(&HandAnalysis) -> [Card; 5],
}

impl Rule {
    pub fn matches(&self, analysis: &HandAnalysis) -> bool {
        (self.matches)(analysis)
    }

    pub fn build(&self, analysis: &HandAnalysis) -> EvaluatedHand {
        let cards = (self.order)(analysis);
        EvaluatedHand::new(self.category, cards, describe(self.category, &cards))
    }
}

fn straight_flush(a: &HandAnalysis) -> bool {
    a.flush.is_some() && a.straight_top.is_some()
}

fn sorted(a: &HandAnalysis) -> [Card; 5] {
    a.cards
}

/// Strongest first; the last rule matches anything.
pub static RULES: [Rule; 10] = [
    Rule {
        category: Category::RoyalFlush,
        matches: |a| straight_flush(a) && a.straight_top == Some(Rank::Ace),
        order: HandAnalysis::by_straight,
    },
    Rule { category: Category::StraightFlush, matches: straight_flush, order: HandAnalysis::by_straight },
    Rule { category: Category::FourOfAKind, matches: |a| a.groups_of(4) == 1, order: HandAnalysis::by_groups },
    Rule { category: Category::FullHouse, matches: |a| a.shape() == [3, 2], order: HandAnalysis::by_groups },
    Rule { category: Category::Flush, matches: |a| a.flush.is_some(), order: sorted },
    Rule { category: Category::Straight, matches: |a| a.straight_top.is_some(), order: HandAnalysis::by_straight },
    Rule { category: Category::ThreeOfAKind, matches: |a| a.groups_of(3) == 1, order: HandAnalysis::by_groups },
    Rule { category: Category::TwoPair, matches: |a| a.groups_of(2) == 2, order: HandAnalysis::by_groups },
    Rule { category: Category::Pair, matches: |a| a.groups_of(2) == 1, order: HandAnalysis::by_groups },
    Rule { category: Category::HighCard, matches: |_| true, order: sorted },
];

/// First matching rule, i.e. the hand's category.
pub fn classify(analysis: &HandAnalysis) -> &'static Rule {
    RULES.iter().find(|r| r.matches(analysis)).unwrap_or(&RULES[RULES.len() - 1])
}

/// "Kings full of Sevens", "Straight, Five high", "Royal Flush in ♥".
fn describe(category: Category, cards: &[Card; 5]) -> String {
    let top = cards[0].rank();
    match category {
        Category::RoyalFlush => format!("Royal Flush in {}", cards[0].suit().symbol()),
        Category::StraightFlush | Category::Flush | Category::Straight => {
            format!("{category}, {} high", top.name())
        }
        Category::FourOfAKind => format!("Four {}", top.plural()),
        Category::FullHouse => format!("{} full of {}", top.plural(), cards[3].rank().plural()),
        Category::ThreeOfAKind => format!("Three {}", top.plural()),
        Category::TwoPair => format!("Two Pair, {} and {}", top.plural(), cards[2].rank().plural()),
        Category::Pair => format!("Pair of {}", top.plural()),
        Category::HighCard => format!("{} high", top.name()),
    }
}
