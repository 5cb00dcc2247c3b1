use crate::model::*;

// [完成形判定 (面子, 雀頭)]

// 面子のみで構成されているかの判定
// 残っている最小の牌種から刻子,順子の順に取り除いて再帰的に探索する
// 呼び出し前後でhandの内容は変化しない
pub fn is_all_melds(hand: &mut TileTable) -> bool {
    let k = match hand.iter().position(|&n| n > 0) {
        Some(k) => k,
        None => return true,
    };

    // 刻子
    if hand[k] >= 3 {
        hand[k] -= 3;
        let ok = is_all_melds(hand);
        hand[k] += 3;
        if ok {
            return true;
        }
    }

    // 順子 (字牌は不可, 数牌の種類をまたがない)
    if is_suit_kind(k) && k % SUIT_LEN < 7 && hand[k + 1] > 0 && hand[k + 2] > 0 {
        hand[k] -= 1;
        hand[k + 1] -= 1;
        hand[k + 2] -= 1;
        let ok = is_all_melds(hand);
        hand[k] += 1;
        hand[k + 1] += 1;
        hand[k + 2] += 1;
        if ok {
            return true;
        }
    }

    false
}

// [和了形判定]

// 通常形 (雀頭+面子)
// 副露がある場合は面子の数が減るので手牌の枚数は問わない
pub fn is_normal_win(hand: &TileTable) -> bool {
    let mut hand = *hand;
    for k in 0..KIND {
        if hand[k] < 2 {
            continue;
        }
        hand[k] -= 2;
        let ok = is_all_melds(&mut hand);
        hand[k] += 2;
        if ok {
            return true;
        }
    }
    false
}

// 七対子 (同種4枚は2対子と見なさない)
pub fn is_chiitoitsu_win(hand: &TileTable) -> bool {
    let mut n_pair = 0;
    for &n in hand.iter() {
        match n {
            0 => {}
            2 => n_pair += 1,
            _ => return false,
        }
    }
    n_pair == 7
}

// total: 手牌の枚数 (七対子は門前の14枚の場合のみ)
pub fn is_winning_hand(hand: &TileTable, total: usize) -> bool {
    if total == 14 && is_chiitoitsu_win(hand) {
        return true;
    }
    is_normal_win(hand)
}

// [和了牌判定]
// 1枚加えて和了形になる牌種を昇順で返却
// 聴牌していない場合は空のリストを返却
// 結果はキャッシュしないので手牌が変化する度に呼び出すこと
pub fn waiting_tile_kinds(hand: &TileTable) -> Vec<Kind> {
    let total: usize = hand.iter().sum();
    let mut hand = *hand;
    let mut res = vec![];
    for k in 0..KIND {
        if hand[k] >= TILE {
            continue; // 5枚目は存在しない
        }
        hand[k] += 1;
        if is_winning_hand(&hand, total + 1) {
            res.push(k);
        }
        hand[k] -= 1;
    }
    res
}

// [聴牌打牌判定]
// 打牌前の手牌において聴牌となる打牌の牌種と待ちの組み合わせの一覧を返却
// 聴牌宣言が可能かどうかの確認用
pub fn calc_discards_to_tenpai(hand: &TileTable) -> Vec<(Kind, Vec<Kind>)> {
    let mut res = vec![];
    let mut hand = *hand;
    for k in 0..KIND {
        if hand[k] == 0 {
            continue;
        }
        hand[k] -= 1;
        let waits = waiting_tile_kinds(&hand);
        if !waits.is_empty() {
            res.push((k, waits));
        }
        hand[k] += 1;
    }
    res
}
