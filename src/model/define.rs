// 型エイリアス
pub type Seat = usize; // 座席
pub type Kind = usize; // 牌種 (0~33)
pub type Index = usize; // その他Index
pub type Score = i32; // 得点

// Number
pub const SEAT: usize = 2; // 座席の数 (プレイヤーとAIの2人)
pub const KIND: usize = 34; // 牌種の数
pub const TILE: usize = 4; // 同種の牌の数
pub const TOTAL_TILE: usize = KIND * TILE; // 全牌数 (=136)
pub const SUIT_LEN: usize = 9; // 数牌1種類あたりの牌種数

// 王牌
pub const DEAD_WALL: usize = 14; // 王牌の枚数
pub const DORA_POS: usize = 4; // ドラ表示牌の位置
pub const URA_DORA_POS: usize = 5; // 裏ドラ表示牌の位置

// 配牌
pub const HAND_SIZE: usize = 13;

// Kind Index
pub const MANZU: Kind = 0; // 萬子 m1~m9 (0~8)
pub const PINZU: Kind = 9; // 筒子 p1~p9 (9~17)
pub const SOUZU: Kind = 18; // 索子 s1~s9 (18~26)
pub const HONOR: Kind = 27; // 字牌 z1~z7 (27~33)
pub const WIND: Kind = 27; // 風牌 東南西北 (27~30)
pub const DRAGON: Kind = 31; // 三元牌 白發中 (31~33)

pub const NO_SEAT: Seat = 255;

#[inline]
pub fn other_seat(seat: Seat) -> Seat {
    1 - seat
}
