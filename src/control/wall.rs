use rand::prelude::*;

use super::common::kinds_from_string;
use crate::model::*;

// 136枚の牌をシャッフルした牌山を生成
pub fn create_wall<R: Rng>(rng: &mut R) -> Vec<Tile> {
    let mut wall: Vec<Tile> = (0..TOTAL_TILE).map(Tile::from_id).collect();
    wall.shuffle(rng);
    wall
}

// 牌山の先頭14枚を王牌として切り出す
// 残りの牌山は末尾からツモを行う
pub fn split_dead_wall(wall: &mut Vec<Tile>) -> Vec<Tile> {
    wall.drain(..DEAD_WALL).collect()
}

// デバッグ用に作為的な牌山を生成 指定がない場所はシード値に従ってランダムに生成
// hands: 各プレイヤーの配牌 (最大13枚)
// deal: 配牌後のツモ順 (最初の牌はseat0の14枚目)
// dora, ura_dora: ドラ表示牌, 裏ドラ表示牌 (空文字列の場合はランダム)
pub fn create_wall_debug(
    seed: u64,
    hands: [&str; SEAT],
    deal: &str,
    dora: &str,
    ura_dora: &str,
) -> Result<Vec<Tile>, String> {
    let mut rest = create_wall(&mut StdRng::seed_from_u64(seed));

    let mut hand_kinds = vec![];
    for h in &hands {
        let kinds = kinds_from_string(h)?;
        if kinds.len() > HAND_SIZE {
            return Err(format!("too many tiles in hand: {}", h));
        }
        hand_kinds.push(kinds);
    }

    // ツモ順 (配牌は1枚ずつ交互)
    let mut order = vec![];
    for i in 0..HAND_SIZE {
        for kinds in &hand_kinds {
            order.push(kinds.get(i).copied());
        }
    }
    for k in kinds_from_string(deal)? {
        order.push(Some(k));
    }

    let mut dead = vec![None; DEAD_WALL];
    dead[DORA_POS] = single_kind(dora)?;
    dead[URA_DORA_POS] = single_kind(ura_dora)?;

    // 指定された牌を先に確保してから残りをランダムに埋める
    let mut fixed_order = vec![];
    for k in &order {
        fixed_order.push(match k {
            Some(k) => Some(take_kind(&mut rest, *k)?),
            None => None,
        });
    }
    let mut fixed_dead = vec![];
    for k in &dead {
        fixed_dead.push(match k {
            Some(k) => Some(take_kind(&mut rest, *k)?),
            None => None,
        });
    }

    let mut wall = vec![];
    for t in fixed_dead {
        wall.push(fill(t, &mut rest)?);
    }
    let mut draws = vec![];
    for t in fixed_order {
        draws.push(fill(t, &mut rest)?);
    }
    draws.append(&mut rest);
    draws.reverse();
    wall.append(&mut draws);

    assert!(wall.len() == TOTAL_TILE);
    Ok(wall)
}

fn single_kind(exp: &str) -> Result<Option<Kind>, String> {
    let kinds = kinds_from_string(exp)?;
    match kinds.len() {
        0 => Ok(None),
        1 => Ok(Some(kinds[0])),
        _ => Err(format!("single tile expected: {}", exp)),
    }
}

fn take_kind(rest: &mut Vec<Tile>, k: Kind) -> Result<Tile, String> {
    let i = rest
        .iter()
        .position(|t| t.kind == k)
        .ok_or_else(|| format!("no more {} in wall", kind_symbol(k)))?;
    Ok(rest.remove(i))
}

fn fill(t: Option<Tile>, rest: &mut Vec<Tile>) -> Result<Tile, String> {
    match t {
        Some(t) => Ok(t),
        None => rest.pop().ok_or_else(|| "wall exhausted".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_wall() {
        let mut rng = StdRng::seed_from_u64(1);
        let wall = create_wall(&mut rng);
        assert_eq!(wall.len(), TOTAL_TILE);
        let mut ids: Vec<Index> = wall.iter().map(|t| t.id).collect();
        ids.sort();
        assert_eq!(ids, (0..TOTAL_TILE).collect::<Vec<_>>());

        // 同じシード値からは同じ牌山
        let wall2 = create_wall(&mut StdRng::seed_from_u64(1));
        assert_eq!(wall, wall2);
    }

    #[test]
    fn test_split_dead_wall() {
        let mut wall = create_wall(&mut StdRng::seed_from_u64(2));
        let head: Vec<Tile> = wall[..DEAD_WALL].to_vec();
        let dead = split_dead_wall(&mut wall);
        assert_eq!(dead, head);
        assert_eq!(wall.len(), TOTAL_TILE - DEAD_WALL);
    }

    #[test]
    fn test_debug_wall() {
        let wall = create_wall_debug(0, ["m111", "z777"], "p1p2", "s5", "z1").unwrap();
        assert_eq!(wall.len(), TOTAL_TILE);
        assert_eq!(wall[DORA_POS].kind, 22);
        assert_eq!(wall[URA_DORA_POS].kind, 27);

        // 末尾から seat0, seat1, seat0, ... の順に配られる
        let n = wall.len();
        assert_eq!(wall[n - 1].kind, 0);
        assert_eq!(wall[n - 2].kind, 33);
        assert_eq!(wall[n - 3].kind, 0);
        assert_eq!(wall[n - 27].kind, 9); // 14枚目
        assert_eq!(wall[n - 28].kind, 10);

        assert!(create_wall_debug(0, ["m11111", ""], "", "", "").is_err());
    }
}
