use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// A card rank. The shoe carries 2..=10 and the three face cards, four of
/// each; face cards count 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Card {
    Number(u8),
    Jack,
    Queen,
    King,
}

impl Card {
    fn value(self) -> u32 {
        match self {
            Card::Number(n) => u32::from(n),
            Card::Jack | Card::Queen | Card::King => 10,
        }
    }

    fn label(self) -> String {
        match self {
            Card::Number(n) => n.to_string(),
            Card::Jack => "J".to_owned(),
            Card::Queen => "Q".to_owned(),
            Card::King => "K".to_owned(),
        }
    }
}

/// Outcome of a resolved hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RoundResult {
    PlayerBusts,
    PlayerWins,
    DealerWins,
    Tie,
}

impl RoundResult {
    /// Stake delta: +1 win, -1 loss, 0 tie.
    pub fn delta(self) -> i64 {
        match self {
            RoundResult::PlayerWins => 1,
            RoundResult::PlayerBusts | RoundResult::DealerWins => -1,
            RoundResult::Tie => 0,
        }
    }
}

/// One side's cards and total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandRecord {
    pub cards: Vec<String>,
    pub total: u32,
}

/// Ledger record for one resolved round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub player: HandRecord,
    pub dealer: HandRecord,
    pub result: RoundResult,
    pub delta: i64,
}

/// A blackjack table with a freshly shuffled shoe per round.
pub struct BlackjackTable;

/// Both player autoplay and the dealer draw to 17.
const STAND_AT: u32 = 17;
const BUST_OVER: u32 = 21;

impl BlackjackTable {
    fn fresh_shoe<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
        let mut shoe = Vec::with_capacity(48);
        for _ in 0..4 {
            for n in 2..=10 {
                shoe.push(Card::Number(n));
            }
            shoe.extend([Card::Jack, Card::Queen, Card::King]);
        }
        shoe.shuffle(rng);
        shoe
    }

    fn hand_value(hand: &[Card]) -> u32 {
        hand.iter().map(|card| card.value()).sum()
    }

    /// Play one full round: two cards each, player autoplays to 17, dealer
    /// draws to 17, then the hands are compared.
    pub fn play_round<R: Rng + ?Sized>(rng: &mut R) -> RoundRecord {
        let mut shoe = Self::fresh_shoe(rng);
        let mut player = vec![shoe.pop().expect("fresh shoe"), shoe.pop().expect("fresh shoe")];
        let mut dealer = vec![shoe.pop().expect("fresh shoe"), shoe.pop().expect("fresh shoe")];

        while Self::hand_value(&player) < STAND_AT {
            player.push(shoe.pop().expect("fresh shoe"));
        }

        let player_total = Self::hand_value(&player);
        if player_total <= BUST_OVER {
            while Self::hand_value(&dealer) < STAND_AT {
                dealer.push(shoe.pop().expect("fresh shoe"));
            }
        }
        let dealer_total = Self::hand_value(&dealer);

        let result = if player_total > BUST_OVER {
            RoundResult::PlayerBusts
        } else if dealer_total > BUST_OVER || player_total > dealer_total {
            RoundResult::PlayerWins
        } else if player_total < dealer_total {
            RoundResult::DealerWins
        } else {
            RoundResult::Tie
        };

        RoundRecord {
            player: HandRecord {
                cards: player.iter().map(|card| card.label()).collect(),
                total: player_total,
            },
            dealer: HandRecord {
                cards: dealer.iter().map(|card| card.label()).collect(),
                total: dealer_total,
            },
            result,
            delta: result.delta(),
        }
    }
}
