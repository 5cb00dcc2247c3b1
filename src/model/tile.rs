use serde::{de, ser};

use super::*;

// 牌の表示用グリフ (index = 牌種)
const GLYPHS: [char; KIND] = [
    '🀇', '🀈', '🀉', '🀊', '🀋', '🀌', '🀍', '🀎', '🀏', // m1~m9
    '🀙', '🀚', '🀛', '🀜', '🀝', '🀞', '🀟', '🀠', '🀡', // p1~p9
    '🀐', '🀑', '🀒', '🀓', '🀔', '🀕', '🀖', '🀗', '🀘', // s1~s9
    '🀀', '🀁', '🀂', '🀃', '🀆', '🀅', '🀄', // 東南西北白發中
];

// 牌種の記号表記 "m1", "z7" など
pub fn kind_symbol(k: Kind) -> String {
    format!("{}{}", ['m', 'p', 's', 'z'][k / SUIT_LEN], k % SUIT_LEN + 1)
}

pub fn kind_from_symbol(s: &str) -> Result<Kind, String> {
    let mut chars = s.chars();
    let (c, n) = match (chars.next(), chars.next(), chars.next()) {
        (Some(c), Some(n), None) => (c, n),
        _ => return Err(format!("invalid tile symbol: '{}'", s)),
    };
    let base = kind_base_from_char(c)?;
    let n = n
        .to_digit(10)
        .ok_or_else(|| format!("invalid tile number: '{}'", n))? as usize;
    let max = if base == HONOR { 7 } else { 9 };
    if n == 0 || n > max {
        return Err(format!("tile number out of range: '{}'", s));
    }
    Ok(base + n - 1)
}

pub fn kind_base_from_char(c: char) -> Result<Kind, String> {
    Ok(match c {
        'm' => MANZU,
        'p' => PINZU,
        's' => SOUZU,
        'z' => HONOR,
        _ => return Err(format!("invalid tile type: '{}'", c)),
    })
}

#[inline]
pub fn is_honor_kind(k: Kind) -> bool {
    k >= HONOR
}

#[inline]
pub fn is_suit_kind(k: Kind) -> bool {
    k < HONOR
}

// 同じ数牌の種類の範囲 (先頭, 末尾)
#[inline]
pub fn suit_range(k: Kind) -> (Kind, Kind) {
    let base = k / SUIT_LEN * SUIT_LEN;
    (base, base + SUIT_LEN - 1)
}

// 牌 (生成後は不変)
// idは同種4枚の物理的な牌を区別するための通し番号 (kind * 4 + n)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    pub kind: Kind,
    pub id: Index,
}

impl Tile {
    #[inline]
    pub fn new(kind: Kind, n: usize) -> Self {
        debug_assert!(kind < KIND && n < TILE);
        Self {
            kind,
            id: kind * TILE + n,
        }
    }

    #[inline]
    pub fn from_id(id: Index) -> Self {
        Self { kind: id / TILE, id }
    }

    pub fn unicode(&self) -> char {
        GLYPHS[self.kind]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", kind_symbol(self.kind))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self, self.id % TILE)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_u64(self.id as u64)
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile id (0~135)")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v as usize >= TOTAL_TILE {
            return Err(E::custom(format!("tile id out of range: {}", v)));
        }
        Ok(Tile::from_id(v as usize))
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_u64(TileVisitor)
    }
}

// [TileTable]
// 牌種ごとの枚数 (長さ34)
pub type TileTable = [usize; KIND];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol() {
        for k in 0..KIND {
            assert_eq!(kind_from_symbol(&kind_symbol(k)), Ok(k));
        }
        assert_eq!(kind_symbol(0), "m1");
        assert_eq!(kind_symbol(17), "p9");
        assert_eq!(kind_symbol(33), "z7");
        assert!(kind_from_symbol("z8").is_err());
        assert!(kind_from_symbol("m0").is_err());
        assert!(kind_from_symbol("x1").is_err());
    }

    #[test]
    fn test_tile_serde() {
        let t = Tile::new(12, 3);
        let s = serde_json::to_string(&t).unwrap();
        assert_eq!(s, "51");
        let t2: Tile = serde_json::from_str(&s).unwrap();
        assert_eq!(t, t2);
        assert!(serde_json::from_str::<Tile>("136").is_err());
    }

    #[test]
    fn test_suit_range() {
        assert_eq!(suit_range(0), (0, 8));
        assert_eq!(suit_range(13), (9, 17));
        assert_eq!(suit_range(26), (18, 26));
        assert!(is_honor_kind(27));
        assert!(!is_honor_kind(26));
    }
}
