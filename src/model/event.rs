use super::*;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    New(EventNew),           // 局開始
    Deal(EventDeal),         // ツモ
    Discard(EventDiscard),   // 打牌
    Meld(EventMeld),         // 鳴き
    Declare(EventDeclare),   // 聴牌宣言 (Phase B開始)
    Guess(EventGuess),       // 識破
    SelfDraw(EventSelfDraw), // B_DRAWでの自摸
    Swap(EventSwap),         // 攻守交代
    Win(EventWin),           // 局終了 (和了,識破成功)
    Draw(EventDraw),         // 局終了 (流局)
}

impl Event {
    #[inline]
    pub fn new(
        dora_indicator: Tile,
        scores: [Score; SEAT],
        hands: [Vec<Tile>; SEAT],
        wall_count: usize,
    ) -> Self {
        Self::New(EventNew {
            dora_indicator,
            scores,
            hands,
            wall_count,
        })
    }

    #[inline]
    pub fn deal(seat: Seat, tile: Tile, is_replacement: bool) -> Self {
        Self::Deal(EventDeal {
            seat,
            tile,
            is_replacement,
        })
    }

    #[inline]
    pub fn discard(seat: Seat, tile: Tile, is_drawn: bool) -> Self {
        Self::Discard(EventDiscard {
            seat,
            tile,
            is_drawn,
        })
    }

    #[inline]
    pub fn meld(seat: Seat, meld_type: MeldType, consumed: Vec<Tile>, claimed: Tile) -> Self {
        Self::Meld(EventMeld {
            seat,
            meld_type,
            consumed,
            claimed,
        })
    }

    #[inline]
    pub fn declare(seat: Seat, tile: Tile) -> Self {
        Self::Declare(EventDeclare { seat, tile })
    }

    #[inline]
    pub fn guess(seat: Seat, kinds: Vec<Kind>, is_hit: bool) -> Self {
        Self::Guess(EventGuess {
            seat,
            kinds,
            is_hit,
        })
    }

    #[inline]
    pub fn self_draw(seat: Seat, tile: Tile, count: usize, is_win: bool) -> Self {
        Self::SelfDraw(EventSelfDraw {
            seat,
            tile,
            count,
            is_win,
        })
    }

    #[inline]
    pub fn swap(attacker: Seat, defender: Seat) -> Self {
        Self::Swap(EventSwap { attacker, defender })
    }

    #[inline]
    pub fn win(
        result: RoundResult,
        hand: Vec<Tile>,
        dora_indicator: Tile,
        ura_dora_indicator: Tile,
        n_dora: usize,
    ) -> Self {
        Self::Win(EventWin {
            result,
            hand,
            dora_indicator,
            ura_dora_indicator,
            n_dora,
        })
    }

    #[inline]
    pub fn draw(hands: [Vec<Tile>; SEAT]) -> Self {
        Self::Draw(EventDraw { hands })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventNew {
    pub dora_indicator: Tile,     // ドラ表示牌
    pub scores: [Score; SEAT],    // 各プレイヤーの所持点
    pub hands: [Vec<Tile>; SEAT], // 各プレイヤーの手牌 (seat0:14枚, seat1:13枚)
    pub wall_count: usize,        // 牌山残り枚数
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDeal {
    pub seat: Seat,
    pub tile: Tile,
    pub is_replacement: bool, // 槓による嶺上牌
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDiscard {
    pub seat: Seat,
    pub tile: Tile,
    pub is_drawn: bool, // ツモ切り
}

#[derive(Debug, Clone, Serialize)]
pub struct EventMeld {
    pub seat: Seat,
    pub meld_type: MeldType,
    pub consumed: Vec<Tile>, // 手牌から消費される牌
    pub claimed: Tile,       // 鳴いた牌
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDeclare {
    pub seat: Seat,
    pub tile: Tile, // 宣言牌
}

#[derive(Debug, Clone, Serialize)]
pub struct EventGuess {
    pub seat: Seat, // 守備側
    pub kinds: Vec<Kind>,
    pub is_hit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventSelfDraw {
    pub seat: Seat,
    pub tile: Tile,
    pub count: usize,  // 何回目の自摸か (1~)
    pub is_win: bool,  // 待ち牌かどうか
}

#[derive(Debug, Clone, Serialize)]
pub struct EventSwap {
    pub attacker: Seat,
    pub defender: Seat,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventWin {
    pub result: RoundResult,
    pub hand: Vec<Tile>,          // 公開された攻撃側の手牌
    pub dora_indicator: Tile,
    pub ura_dora_indicator: Tile, // 和了時に公開
    pub n_dora: usize,            // 勝者の手牌,鳴きに含まれるドラの数
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDraw {
    pub hands: [Vec<Tile>; SEAT],
}
