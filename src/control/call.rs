use super::common::{count_kind, tiles_to_tile_table};
use crate::model::*;
use crate::util::error::EngineError;

// [鳴き判定]
// 対象は直前に他家が捨てた牌のみ

pub fn can_pon(hand: &[Tile], tile: Tile) -> bool {
    count_kind(hand, tile.kind) >= 2
}

// 手牌に同種3枚を持つ場合の大明槓のみ (暗槓,加槓は対象外)
pub fn can_kan(hand: &[Tile], tile: Tile) -> bool {
    count_kind(hand, tile.kind) == 3
}

pub fn can_chi(hand: &[Tile], tile: Tile) -> bool {
    chi_pair(&tiles_to_tile_table(hand), tile.kind).is_some()
}

// チーで手牌から消費する2枚の牌種
// 嵌張(k-1,k+1), 辺張・両面の下側(k-2,k-1), 上側(k+1,k+2)の順に優先
pub fn chi_pair(hand: &TileTable, k: Kind) -> Option<(Kind, Kind)> {
    if !is_suit_kind(k) {
        return None;
    }
    let (min, max) = suit_range(k);
    let has = |d: isize| -> bool {
        let x = k as isize + d;
        x >= min as isize && x <= max as isize && hand[x as usize] > 0
    };
    if has(-1) && has(1) {
        Some((k - 1, k + 1))
    } else if has(-2) && has(-1) {
        Some((k - 2, k - 1))
    } else if has(1) && has(2) {
        Some((k + 1, k + 2))
    } else {
        None
    }
}

// 嶺上牌(表示牌以外の王牌)が残っているかどうか
#[inline]
pub fn has_replacement(dead_wall: &[Tile]) -> bool {
    dead_wall.len() > URA_DORA_POS + 1
}

// 打牌に対して可能な鳴きの一覧 (Chi, Pon, Kanの順)
pub fn available_calls(hand: &[Tile], tile: Tile, dead_wall: &[Tile]) -> Vec<MeldType> {
    let mut calls = vec![];
    if can_chi(hand, tile) {
        calls.push(MeldType::Chi);
    }
    if can_pon(hand, tile) {
        calls.push(MeldType::Pon);
    }
    if can_kan(hand, tile) && has_replacement(dead_wall) {
        calls.push(MeldType::Kan);
    }
    calls
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    pub consumed: Vec<Tile>,       // 手牌から消費した牌
    pub replacement: Option<Tile>, // 槓の嶺上牌
}

// 鳴きの実行
// 捨て牌を河から取り除き,手牌から該当する牌を抜いて鳴きを作成する. 槓の場合は嶺上牌を1枚ツモる.
// 鳴いたプレイヤーはこの後打牌を行う必要がある.
// 不正な鳴きの場合は状態を変更せずにErrを返す
pub fn execute_call(
    stg: &mut RoundState,
    meld_type: MeldType,
    claimant: Seat,
    discarder: Seat,
    tile: Tile,
) -> Result<CallResult, EngineError> {
    if claimant == discarder || stg.players[discarder].river.last() != Some(&tile) {
        return Err(EngineError::IllegalCall(format!(
            "{:?} on {} (not the last discard)",
            meld_type, tile
        )));
    }

    let hand = &stg.players[claimant].hand;
    let consume_kinds: Vec<Kind> = match meld_type {
        MeldType::Chi => match chi_pair(&tiles_to_tile_table(hand), tile.kind) {
            Some((k0, k1)) => vec![k0, k1],
            None => vec![],
        },
        MeldType::Pon if can_pon(hand, tile) => vec![tile.kind; 2],
        MeldType::Kan if can_kan(hand, tile) && has_replacement(&stg.dead_wall) => {
            vec![tile.kind; 3]
        }
        _ => vec![],
    };
    if consume_kinds.is_empty() {
        return Err(EngineError::IllegalCall(format!("{:?} on {}", meld_type, tile)));
    }

    stg.players[discarder].river.pop();

    let pl = &mut stg.players[claimant];
    let mut consumed = vec![];
    for k in consume_kinds {
        // 直前に枚数を確認済み
        if let Some(t) = pl.take_kind(k) {
            consumed.push(t);
        }
    }

    let mut tiles = consumed.clone();
    tiles.push(tile);
    tiles.sort();
    pl.melds.push(Meld {
        seat: claimant,
        meld_type,
        tiles,
        claimed: tile,
        from: discarder,
    });
    pl.drawn = None;

    let replacement = if meld_type == MeldType::Kan {
        let r = stg.dead_wall.pop();
        if let Some(r) = r {
            let pl = &mut stg.players[claimant];
            pl.hand.push(r);
            pl.drawn = Some(r);
        }
        r
    } else {
        None
    };
    stg.players[claimant].sort_hand();

    Ok(CallResult {
        consumed,
        replacement,
    })
}
