use crate::model::*;

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = [0; KIND];
    for t in tiles {
        tt[t.kind] += 1;
    }
    tt
}

pub fn count_kind(tiles: &[Tile], k: Kind) -> usize {
    tiles.iter().filter(|t| t.kind == k).count()
}

// "m123p55z7" のような表記を牌種のリストに変換
pub fn kinds_from_string(exp: &str) -> Result<Vec<Kind>, String> {
    let mut kinds = vec![];
    let mut base = None;
    for c in exp.chars() {
        match c {
            'm' | 'p' | 's' | 'z' => base = Some(kind_base_from_char(c)?),
            '1'..='9' => {
                let b = base.ok_or_else(|| "tile number before tile type".to_string())?;
                let n = c as usize - '1' as usize;
                if b == HONOR && n >= 7 {
                    return Err(format!("invalid honor tile: z{}", c));
                }
                kinds.push(b + n);
            }
            ' ' | ',' => {}
            _ => return Err(format!("invalid char: '{}'", c)),
        }
    }
    Ok(kinds)
}

pub fn table_from_string(exp: &str) -> Result<TileTable, String> {
    let mut tt = [0; KIND];
    for k in kinds_from_string(exp)? {
        tt[k] += 1;
        if tt[k] > TILE {
            return Err(format!("more than {} copies of {}", TILE, kind_symbol(k)));
        }
    }
    Ok(tt)
}

// 牌種の出現順に0から通し番号を振った牌のリストを返却
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, String> {
    let mut used = [0; KIND];
    let mut tiles = vec![];
    for k in kinds_from_string(exp)? {
        if used[k] == TILE {
            return Err(format!("more than {} copies of {}", TILE, kind_symbol(k)));
        }
        tiles.push(Tile::new(k, used[k]));
        used[k] += 1;
    }
    Ok(tiles)
}

// 牌のリストを "m123p55z7" のような表記に変換 (牌種の昇順)
pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut kinds: Vec<Kind> = tiles.iter().map(|t| t.kind).collect();
    kinds.sort_unstable();
    kinds_to_string(&kinds)
}

pub fn kinds_to_string(kinds: &[Kind]) -> String {
    let mut res = String::new();
    let mut prev = None;
    for &k in kinds {
        let c = ['m', 'p', 's', 'z'][k / SUIT_LEN];
        if prev != Some(c) {
            res.push(c);
            prev = Some(c);
        }
        res.push_str(&(k % SUIT_LEN + 1).to_string());
    }
    res
}

#[test]
fn test_tile_notation() {
    let tiles = tiles_from_string("m1123p55z7").unwrap();
    assert_eq!(tiles.len(), 7);
    assert_eq!(tiles[0], Tile::new(0, 0));
    assert_eq!(tiles[1], Tile::new(0, 1));
    assert_eq!(tiles[6].kind, 33);
    assert_eq!(tiles_to_string(&tiles), "m1123p55z7");

    let tt = tiles_to_tile_table(&tiles);
    assert_eq!(tt[0], 2);
    assert_eq!(tt[13], 2);
    assert_eq!(tt, table_from_string("z7p55m3211").unwrap());

    assert!(tiles_from_string("m11111").is_err());
    assert!(table_from_string("z8").is_err());
    assert!(kinds_from_string("1m").is_err());
}
