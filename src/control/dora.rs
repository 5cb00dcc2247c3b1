use serde::Serialize;

use crate::model::*;

// ドラ表示牌の次の牌種 (= ドラ)
// 数牌は9→1, 風牌は北→東, 三元牌は中→白で循環
pub fn next_kind(k: Kind) -> Kind {
    let (base, len) = if k < HONOR {
        (k / SUIT_LEN * SUIT_LEN, SUIT_LEN)
    } else if k < DRAGON {
        (WIND, 4)
    } else {
        (DRAGON, 3)
    };
    base + (k - base + 1) % len
}

// [DoraTracker]
// 局中は表ドラのみ. 裏ドラは和了(自摸和了,識破成功)の時点で1度だけ公開される.
#[derive(Debug, Clone, Serialize)]
pub struct DoraTracker {
    indicator: Tile,
    ura_indicator: Tile,
    is_ura_revealed: bool,
}

impl DoraTracker {
    pub fn new(indicator: Tile, ura_indicator: Tile) -> Self {
        Self {
            indicator,
            ura_indicator,
            is_ura_revealed: false,
        }
    }

    #[inline]
    pub fn indicator(&self) -> Tile {
        self.indicator
    }

    // 公開前はNone
    #[inline]
    pub fn ura_indicator(&self) -> Option<Tile> {
        if self.is_ura_revealed {
            Some(self.ura_indicator)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_ura_revealed(&self) -> bool {
        self.is_ura_revealed
    }

    // 公開済みの表示牌
    pub fn indicators(&self) -> Vec<Tile> {
        let mut v = vec![self.indicator];
        if self.is_ura_revealed {
            v.push(self.ura_indicator);
        }
        v
    }

    pub fn reveal_ura(&mut self) {
        self.is_ura_revealed = true;
    }

    pub fn is_bonus_tile(&self, k: Kind) -> bool {
        if k == next_kind(self.indicator.kind) {
            return true;
        }
        self.is_ura_revealed && k == next_kind(self.ura_indicator.kind)
    }

    // ドラの枚数を勘定 (表ドラと裏ドラが同じ牌種の場合は2枚として数える)
    pub fn count_dora<'a>(&self, tiles: impl Iterator<Item = &'a Tile>) -> usize {
        let dora = next_kind(self.indicator.kind);
        let ura = next_kind(self.ura_indicator.kind);
        let mut n = 0;
        for t in tiles {
            if t.kind == dora {
                n += 1;
            }
            if self.is_ura_revealed && t.kind == ura {
                n += 1;
            }
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_kind() {
        assert_eq!(next_kind(0), 1);
        assert_eq!(next_kind(8), 0); // m9 -> m1
        assert_eq!(next_kind(17), 9); // p9 -> p1
        assert_eq!(next_kind(26), 18); // s9 -> s1
        assert_eq!(next_kind(27), 28); // 東 -> 南
        assert_eq!(next_kind(30), 27); // 北 -> 東
        assert_eq!(next_kind(31), 32); // 白 -> 發
        assert_eq!(next_kind(33), 31); // 中 -> 白
    }

    #[test]
    fn test_next_kind_cycle() {
        for k in 0..KIND {
            let len = if k < HONOR {
                9
            } else if k < DRAGON {
                4
            } else {
                3
            };
            let mut x = k;
            for i in 1..=len {
                x = next_kind(x);
                assert_eq!(x == k, i == len, "kind {} step {}", k, i);
            }
        }
    }

    #[test]
    fn test_bonus_tile() {
        // 表示牌 m9, 裏表示牌 z7
        let mut dora = DoraTracker::new(Tile::new(8, 0), Tile::new(33, 1));
        assert!(dora.is_bonus_tile(0));
        assert!(!dora.is_bonus_tile(31));
        assert_eq!(dora.ura_indicator(), None);
        assert_eq!(dora.indicators().len(), 1);

        let tiles = vec![Tile::new(0, 1), Tile::new(31, 0), Tile::new(31, 2)];
        assert_eq!(dora.count_dora(tiles.iter()), 1);

        dora.reveal_ura();
        assert!(dora.is_bonus_tile(31));
        assert_eq!(dora.ura_indicator(), Some(Tile::new(33, 1)));
        assert_eq!(dora.count_dora(tiles.iter()), 3);
    }
}
