use super::engine::tenpai_discards;
use crate::model::*;

// [Possible Actions]
// 現在の局面でseatのプレイヤーが選択可能な操作の一覧
// 牌山からのツモ(Draw, SelfDraw)と識破(Guess)は選択肢を持たないので空のリストを返却
pub fn calc_possible_actions(stg: &RoundState, seat: Seat) -> Vec<Action> {
    if stg.acting_seat() != Some(seat) {
        return vec![];
    }

    match &stg.pending {
        Pending::Discard => calc_possible_turn_actions(stg, seat),
        Pending::Call { calls, .. } => calc_possible_call_actions(calls),
        Pending::SelfDrawWin { .. } => vec![Action::tsumo(), Action::nop()],
        _ => vec![],
    }
}

fn calc_possible_turn_actions(stg: &RoundState, seat: Seat) -> Vec<Action> {
    let pl = &stg.players[seat];
    let mut acts: Vec<Action> = (0..pl.hand.len()).map(Action::discard).collect();
    for (i, waits) in tenpai_discards(pl) {
        acts.push(Action::declare(i, waits));
    }
    acts
}

fn calc_possible_call_actions(calls: &[MeldType]) -> Vec<Action> {
    let mut acts = vec![Action::nop()];
    for &c in calls {
        acts.push(Action::call(c));
    }
    acts
}
