use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub seat: Seat,           // 座席番号
    pub score: Score,         // 得点 (対戦終了まで局をまたいで保持)
    pub hand: Vec<Tile>,      // 手牌 (常にソート済み)
    pub drawn: Option<Tile>,  // 直前のツモ牌 (表示用)
    pub melds: Vec<Meld>,     // 鳴き一覧
    pub river: Vec<Tile>,     // 捨て牌一覧
    pub is_shown: bool,       // 手牌が公開されているかどうか
    pub is_tenpai: bool,      // 聴牌宣言済み
    pub waits: Vec<Kind>,     // 聴牌宣言時の待ち牌種
}

impl Player {
    pub fn new(seat: Seat, score: Score) -> Self {
        Self {
            seat,
            score,
            hand: vec![],
            drawn: None,
            melds: vec![],
            river: vec![],
            is_shown: false,
            is_tenpai: false,
            waits: vec![],
        }
    }

    pub fn count_kind(&self, k: Kind) -> usize {
        self.hand.iter().filter(|t| t.kind == k).count()
    }

    // 手牌の牌種ごとの枚数
    pub fn hand_table(&self) -> TileTable {
        let mut tt = [0; KIND];
        for t in &self.hand {
            tt[t.kind] += 1;
        }
        tt
    }

    pub fn sort_hand(&mut self) {
        self.hand.sort();
    }

    // 牌種kの牌を手牌から1枚取り除いて返却
    pub fn take_kind(&mut self, k: Kind) -> Option<Tile> {
        let i = self.hand.iter().position(|t| t.kind == k)?;
        Some(self.hand.remove(i))
    }

    pub fn meld_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.melds.iter().flat_map(|m| m.tiles.iter())
    }

    // viewerから見たプレイヤー情報 (None: 全て公開)
    pub fn view(&self, viewer: Option<Seat>) -> PlayerView<'_> {
        PlayerView {
            player: self,
            reveal: self.is_shown || viewer.map_or(true, |v| v == self.seat),
        }
    }
}

// 手牌と待ちは公開されている場合のみ表示
pub struct PlayerView<'a> {
    player: &'a Player,
    reveal: bool,
}

impl PlayerView<'_> {
    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.reveal
    }
}

impl fmt::Display for PlayerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pl = self.player;
        let (waits, drawn, hand) = if self.reveal {
            let waits: Vec<String> = pl.waits.iter().map(|&k| kind_symbol(k)).collect();
            let drawn = match pl.drawn {
                Some(d) => d.to_string(),
                None => "None".to_string(),
            };
            (waits.join(", "), drawn, vec_to_string(&pl.hand))
        } else {
            ("?".to_string(), "?".to_string(), format!("?? x{}", pl.hand.len()))
        };
        writeln!(
            f,
            "seat: {}, score: {}, tenpai: {}, waits: [{}], drawn: {}",
            pl.seat, pl.score, pl.is_tenpai, waits, drawn,
        )?;
        writeln!(f, "hand: {}", hand)?;
        writeln!(f, "melds: {}", vec_to_string(&pl.melds))?;
        write!(f, "river: {}", vec_to_string(&pl.river))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = PlayerView {
            player: self,
            reveal: self.is_shown,
        };
        write!(f, "{}", view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi, // 順子
    Pon, // 刻子
    Kan, // 槓子 (他家の捨て牌による明槓のみ)
}

#[derive(Debug, Clone, Serialize)]
pub struct Meld {
    pub seat: Seat,          // 鳴いたプレイヤー
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,    // ソート済み
    pub claimed: Tile,       // 他家から鳴いた牌
    pub from: Seat,          // 鳴かれたプレイヤー
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self
            .tiles
            .iter()
            .map(|t| {
                if t.id == self.claimed.id {
                    format!("{}({})", t, self.from)
                } else {
                    t.to_string()
                }
            })
            .collect();
        write!(f, "{}", s.join("|"))
    }
}

#[test]
fn test_player_view() {
    let mut pl = Player::new(1, 30000);
    pl.hand = vec![Tile::new(0, 0), Tile::new(33, 1)];
    pl.waits = vec![33];
    pl.is_tenpai = true;

    let hidden = pl.to_string();
    assert!(hidden.contains("hand: ?? x2"));
    assert!(hidden.contains("waits: [?]"));
    assert!(!pl.view(Some(0)).is_revealed());
    assert!(pl.view(Some(1)).is_revealed());
    assert!(pl.view(None).is_revealed());
    assert!(pl.view(Some(1)).to_string().contains(&format!("hand: {}", vec_to_string(&pl.hand))));

    pl.is_shown = true;
    assert!(pl.view(Some(0)).to_string().contains(&format!("waits: [{}]", kind_symbol(33))));
}
